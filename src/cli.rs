use crate::model::attendance::Location;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "fichaje",
    about = "Terminal client for the team's time-tracking service",
    version
)]
pub struct Cli {
    /// Server base URL; overrides FICHAJE_SERVER.
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Live dashboard: current status, today's stats and today's entries.
    Watch {
        /// Refresh cadence in seconds; overrides FICHAJE_POLL_SECS.
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Check in and start a work session.
    In {
        /// Where the session happens.
        #[arg(value_enum)]
        location: Location,

        /// Free-form note stored with the entry.
        #[arg(long)]
        notes: Option<String>,

        /// Act on behalf of this employee (admin).
        #[arg(long)]
        employee: Option<u64>,
    },

    /// Check out and close the active session.
    Out {
        #[arg(long)]
        notes: Option<String>,

        /// Act on behalf of this employee (admin).
        #[arg(long)]
        employee: Option<u64>,
    },

    /// One-shot status: panel, stats and today's entries.
    Status,

    /// Today's attendance entries.
    Today,

    /// Attendance entries over the last days.
    History {
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Restrict to one employee.
        #[arg(long)]
        employee: Option<u64>,
    },

    /// Employee administration.
    #[command(subcommand)]
    Employees(EmployeeCommand),
}

#[derive(Subcommand)]
pub enum EmployeeCommand {
    /// Roster listing, active employees by default.
    List {
        /// Include deactivated employees.
        #[arg(long)]
        all: bool,

        /// Substring filter on name, email or position.
        #[arg(long)]
        filter: Option<String>,
    },

    /// Full detail for one employee.
    Show { id: u64 },

    /// Register a new employee.
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        position: Option<String>,
    },

    /// Update fields on an existing employee.
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        position: Option<String>,

        /// Reactivate ("true") or deactivate ("false").
        #[arg(long)]
        active: Option<bool>,
    },

    /// Soft-delete: the employee stays in history but leaves the roster.
    Deactivate { id: u64 },
}
