use super::{ApiClient, ApiError};
use crate::model::attendance::{
    ActionResponse, AttendanceListResponse, AttendanceRecord, CheckInRequest, CheckOutRequest,
    CurrentResponse, DailyStats,
};

/// Attendance operations the controller drives. `ApiClient` is the production
/// implementation; controller tests substitute a scripted fake.
pub trait AttendanceApi {
    /// Active attendance for the session holder, if any.
    async fn current_attendance(&self) -> Result<Option<AttendanceRecord>, ApiError>;

    /// Aggregate counters for the current day.
    async fn today_stats(&self) -> Result<DailyStats, ApiError>;

    /// Everyone's attendance entries for the current day.
    async fn today_attendances(&self) -> Result<Vec<AttendanceRecord>, ApiError>;

    async fn check_in(&self, req: &CheckInRequest) -> Result<ActionResponse, ApiError>;

    async fn check_out(&self, req: &CheckOutRequest) -> Result<ActionResponse, ApiError>;
}

impl AttendanceApi for ApiClient {
    async fn current_attendance(&self) -> Result<Option<AttendanceRecord>, ApiError> {
        let resp: CurrentResponse = self.get_json("/attendance/api/current").await?;
        Ok(resp.attendance)
    }

    async fn today_stats(&self) -> Result<DailyStats, ApiError> {
        self.get_json("/attendance/api/stats/today").await
    }

    async fn today_attendances(&self) -> Result<Vec<AttendanceRecord>, ApiError> {
        let resp: AttendanceListResponse = self.get_json("/attendance/api/today").await?;
        Ok(resp.attendances)
    }

    async fn check_in(&self, req: &CheckInRequest) -> Result<ActionResponse, ApiError> {
        self.post_json("/attendance/api/check-in", req).await
    }

    async fn check_out(&self, req: &CheckOutRequest) -> Result<ActionResponse, ApiError> {
        self.post_json("/attendance/api/check-out", req).await
    }
}

impl ApiClient {
    /// Attendance entries for the last `days` days, optionally for a single
    /// employee.
    pub async fn history(
        &self,
        days: u32,
        employee_id: Option<u64>,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let mut req = self
            .http
            .get(self.url("/attendance/api/history"))
            .query(&[("days", days)]);
        if let Some(id) = employee_id {
            req = req.query(&[("employee_id", id)]);
        }

        let resp = req.send().await?;
        let resp: AttendanceListResponse = Self::decode(resp).await?;
        Ok(resp.attendances)
    }
}
