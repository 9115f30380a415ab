use clap::Parser;
use dotenvy::dotenv;

mod api;
mod cli;
mod commands;
mod config;
mod controller;
mod model;
mod timer;
mod utils;
mod view;

use api::ApiClient;
use cli::{Cli, Command};
use config::Config;

use tracing::info;
use tracing_appender::rolling;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env(cli.server.clone());

    // Rolling daily log; the terminal stays free for the views.
    let file_appender = rolling::daily("logs", "fichaje.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Client starting...");

    let client = ApiClient::new(&config)?;

    match cli.command {
        Command::Watch { interval } => commands::watch(&config, client, interval).await,
        Command::In {
            location,
            notes,
            employee,
        } => commands::check_in(&config, client, location, notes, employee).await,
        Command::Out { notes, employee } => {
            commands::check_out(&config, client, notes, employee).await
        }
        Command::Status => commands::status(&config, client).await,
        Command::Today => commands::today(client).await,
        Command::History { days, employee } => commands::history(client, days, employee).await,
        Command::Employees(cmd) => commands::employees(client, cmd).await,
    }
}
