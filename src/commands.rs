use crate::api::{ApiClient, AttendanceApi};
use crate::cli::EmployeeCommand;
use crate::config::Config;
use crate::controller::AttendanceController;
use crate::model::attendance::{AttendanceRecord, Location};
use crate::model::employee::{NewEmployee, UpdateEmployee};
use crate::utils::{format, roster_cache};
use crate::view::table::{AttendanceTable, EmployeeTable};
use crate::view::{Dashboard, PlainView};
use anyhow::{Context, bail};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Live dashboard. Runs until the process is killed.
pub async fn watch(
    config: &Config,
    client: ApiClient,
    interval: Option<u64>,
) -> anyhow::Result<()> {
    let poll_secs = interval.unwrap_or(config.poll_secs).max(1);
    let view = Arc::new(Dashboard::new().context("Could not initialize the terminal")?);
    let mut controller =
        AttendanceController::new(client, view, Duration::from_secs(config.tick_secs));

    info!(poll_secs, "Watch started");
    let mut poll = tokio::time::interval(Duration::from_secs(poll_secs));
    loop {
        poll.tick().await;
        let _ = controller.refresh_all().await;
    }
}

pub async fn check_in(
    config: &Config,
    client: ApiClient,
    location: Location,
    notes: Option<String>,
    employee: Option<u64>,
) -> anyhow::Result<()> {
    announce_target(&client, employee).await?;

    let view = Arc::new(PlainView::quiet());
    let mut controller =
        AttendanceController::new(client, view, Duration::from_secs(config.tick_secs));
    controller.check_in(location, notes, employee).await?;
    Ok(())
}

pub async fn check_out(
    config: &Config,
    client: ApiClient,
    notes: Option<String>,
    employee: Option<u64>,
) -> anyhow::Result<()> {
    announce_target(&client, employee).await?;

    let view = Arc::new(PlainView::quiet());
    let mut controller =
        AttendanceController::new(client, view, Duration::from_secs(config.tick_secs));

    // The no-active-session guard needs server truth behind it; a failed
    // fetch is a failure, not "no session".
    controller
        .refresh_all()
        .await
        .context("Could not load the current status")?;
    if employee.is_none() && controller.current().is_none() {
        println!("No active check-in found");
        return Ok(());
    }

    controller.check_out(notes, employee).await?;
    Ok(())
}

/// Resolve and echo the on-behalf target. Only active-roster members are
/// accepted.
async fn announce_target(client: &ApiClient, employee: Option<u64>) -> anyhow::Result<()> {
    let Some(id) = employee else {
        return Ok(());
    };

    match roster_cache::employee_name(client, id).await? {
        Some(name) => {
            println!("Acting for {} (#{})", name, id);
            Ok(())
        }
        None => bail!("Employee {} is not on the active roster", id),
    }
}

pub async fn status(config: &Config, client: ApiClient) -> anyhow::Result<()> {
    let view = Arc::new(PlainView::detailed());
    let mut controller =
        AttendanceController::new(client, view, Duration::from_secs(config.tick_secs));
    controller.refresh_all().await?;
    Ok(())
}

pub async fn today(client: ApiClient) -> anyhow::Result<()> {
    let records = client.today_attendances().await?;
    print_attendance_table(&records, "No attendance recorded today yet.");
    Ok(())
}

pub async fn history(
    client: ApiClient,
    days: u32,
    employee: Option<u64>,
) -> anyhow::Result<()> {
    let records = client.history(days, employee).await?;
    print_attendance_table(&records, "No attendance recorded in that period.");
    Ok(())
}

fn print_attendance_table(records: &[AttendanceRecord], empty_message: &str) {
    if records.is_empty() {
        println!("{}", empty_message);
        return;
    }
    for line in AttendanceTable::render(records) {
        println!("{}", line);
    }
}

pub async fn employees(client: ApiClient, cmd: EmployeeCommand) -> anyhow::Result<()> {
    match cmd {
        EmployeeCommand::List { all, filter } => {
            let mut employees = roster_cache::roster(&client, !all).await?;
            if let Some(filter) = filter {
                let needle = filter.to_lowercase();
                employees.retain(|e| {
                    e.name.to_lowercase().contains(&needle)
                        || e.email.to_lowercase().contains(&needle)
                        || e.position
                            .as_deref()
                            .is_some_and(|p| p.to_lowercase().contains(&needle))
                });
            }

            if employees.is_empty() {
                println!("No employees matched.");
                return Ok(());
            }
            for line in EmployeeTable::render(&employees) {
                println!("{}", line);
            }
            Ok(())
        }

        EmployeeCommand::Show { id } => {
            let employee = client.get_employee(id).await?;
            println!("#{} {}", employee.id, employee.name);
            println!("Email: {}", employee.email);
            if let Some(position) = &employee.position {
                println!("Position: {}", position);
            }
            println!("Active: {}", if employee.is_active { "yes" } else { "no" });
            if let Some(created_at) = employee.created_at {
                println!("Since: {}", format::date_time(created_at));
            }
            Ok(())
        }

        EmployeeCommand::Add {
            name,
            email,
            position,
        } => {
            if name.trim().is_empty() {
                bail!("A name is required");
            }
            if email.trim().is_empty() {
                bail!("An email is required");
            }

            let resp = client
                .create_employee(&NewEmployee {
                    name,
                    email,
                    position,
                    is_active: None,
                })
                .await?;
            roster_cache::invalidate();

            println!("{}", resp.message);
            if let Some(employee) = resp.employee {
                println!("Assigned id {}", employee.id);
            }
            Ok(())
        }

        EmployeeCommand::Update {
            id,
            name,
            email,
            position,
            active,
        } => {
            if name.is_none() && email.is_none() && position.is_none() && active.is_none() {
                bail!("Nothing to update; pass at least one field");
            }

            let update = UpdateEmployee {
                name,
                email,
                position,
                is_active: active,
            };
            let resp = client.update_employee(id, &update).await?;
            roster_cache::invalidate();

            println!("{}", resp.message);
            Ok(())
        }

        EmployeeCommand::Deactivate { id } => {
            let resp = client.deactivate_employee(id).await?;
            roster_cache::invalidate();
            println!("{}", resp.message);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Points at a reserved port, so any request that does go out fails fast.
    fn offline_config() -> Config {
        Config {
            server_url: "http://127.0.0.1:9".to_string(),
            poll_secs: 30,
            tick_secs: 1,
            http_timeout_secs: 1,
        }
    }

    fn offline_client() -> ApiClient {
        ApiClient::new(&offline_config()).unwrap()
    }

    #[tokio::test]
    async fn test_check_out_fails_when_the_status_fetch_fails() {
        let config = offline_config();
        let result = check_out(&config, offline_client(), None, None).await;

        // An unreachable server must not be reported as "no active session".
        let err = result.unwrap_err();
        assert!(
            format!("{:#}", err).contains("Could not load the current status"),
            "unexpected error: {:#}",
            err
        );
    }

    #[tokio::test]
    async fn test_check_in_returns_the_failure_to_the_caller() {
        let config = offline_config();
        let result = check_in(&config, offline_client(), Location::Office, None, None).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_employee_add_requires_a_name() {
        let result = employees(
            offline_client(),
            EmployeeCommand::Add {
                name: "   ".to_string(),
                email: "ana@example.com".to_string(),
                position: None,
            },
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "A name is required");
    }

    #[tokio::test]
    async fn test_employee_add_requires_an_email() {
        let result = employees(
            offline_client(),
            EmployeeCommand::Add {
                name: "Ana Torres".to_string(),
                email: "".to_string(),
                position: None,
            },
        )
        .await;

        assert_eq!(result.unwrap_err().to_string(), "An email is required");
    }

    #[tokio::test]
    async fn test_employee_update_rejects_an_empty_field_set() {
        let result = employees(
            offline_client(),
            EmployeeCommand::Update {
                id: 3,
                name: None,
                email: None,
                position: None,
                active: None,
            },
        )
        .await;

        assert_eq!(
            result.unwrap_err().to_string(),
            "Nothing to update; pass at least one field"
        );
    }
}
