use crate::api::{ApiClient, ApiError};
use crate::model::employee::Employee;
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Roster snapshots keyed by scope ("active" / "all"), five-minute TTL.
/// Keeps repeated admin actions in one process from refetching the list.
pub static ROSTER_CACHE: Lazy<Cache<String, Vec<Employee>>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(4)
        .time_to_live(Duration::from_secs(300))
        .build()
});

fn scope_key(active_only: bool) -> String {
    if active_only { "active" } else { "all" }.to_string()
}

/// Fetch the employee roster through the cache.
pub async fn roster(client: &ApiClient, active_only: bool) -> Result<Vec<Employee>, ApiError> {
    let key = scope_key(active_only);
    if let Some(hit) = ROSTER_CACHE.get(&key).await {
        return Ok(hit);
    }

    let employees = client.list_employees(active_only).await?;
    ROSTER_CACHE.insert(key, employees.clone()).await;
    Ok(employees)
}

/// Resolve an employee's display name from the active roster.
pub async fn employee_name(client: &ApiClient, id: u64) -> Result<Option<String>, ApiError> {
    let employees = roster(client, true).await?;
    Ok(employees.into_iter().find(|e| e.id == id).map(|e| e.name))
}

/// Drop cached rosters after a mutation so the next lookup refetches.
pub fn invalidate() {
    ROSTER_CACHE.invalidate_all();
}
