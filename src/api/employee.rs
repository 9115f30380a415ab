use super::{ApiClient, ApiError};
use crate::model::employee::{
    Employee, EmployeeActionResponse, EmployeeListResponse, MessageResponse, NewEmployee,
    UpdateEmployee,
};

impl ApiClient {
    /// Full or active-only roster, server-sorted by name.
    pub async fn list_employees(&self, active_only: bool) -> Result<Vec<Employee>, ApiError> {
        let resp = self
            .http
            .get(self.url("/employees/api"))
            .query(&[("active_only", active_only)])
            .send()
            .await?;

        let resp: EmployeeListResponse = Self::decode(resp).await?;
        Ok(resp.employees)
    }

    pub async fn get_employee(&self, id: u64) -> Result<Employee, ApiError> {
        self.get_json(&format!("/employees/api/{}", id)).await
    }

    pub async fn create_employee(
        &self,
        req: &NewEmployee,
    ) -> Result<EmployeeActionResponse, ApiError> {
        self.post_json("/employees/api", req).await
    }

    /// Partial update: only the fields set in `req` are sent.
    pub async fn update_employee(
        &self,
        id: u64,
        req: &UpdateEmployee,
    ) -> Result<EmployeeActionResponse, ApiError> {
        self.put_json(&format!("/employees/api/{}", id), req).await
    }

    /// The service deactivates rather than deletes.
    pub async fn deactivate_employee(&self, id: u64) -> Result<MessageResponse, ApiError> {
        self.delete_json(&format!("/employees/api/{}", id)).await
    }
}
