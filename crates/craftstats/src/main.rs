//! craftstats CLI - player activity monitor for MineOS-hosted Minecraft servers

use anyhow::Result;
use clap::{CommandFactory, Parser};
use craftstats_core::constants::LOG_FILE;
use craftstats_host::MineosHost;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod monitor;
mod output;

use cli::{Cli, Commands, ConfigureTarget};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose);

    let command = match cli.command {
        Some(command) => command,
        None => {
            // A mode is required; showing help without one is an error
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let host = MineosHost::new(&cli.base_directory);
    let delay = Duration::from_secs(cli.delay);

    let result = match command {
        Commands::List => commands::list::execute(&host).await,
        Commands::Single { name } => commands::monitor::single(&host, &name, delay).await,
        Commands::Multi => commands::monitor::multi(&host, delay).await,
        Commands::Interactive => commands::monitor::interactive(&host, delay).await,
        Commands::Report { once, days } => commands::report::execute(once, days, delay).await,
        Commands::Configure { target } => match target {
            ConfigureTarget::Db => commands::configure::db().await,
            ConfigureTarget::Email => commands::configure::email().await,
        },
        Commands::ClearPassword { target } => commands::clear_password::execute(target).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Route logs to craftstats.log when quiet, stderr when verbose
///
/// The returned guard must stay alive for the worker to flush.
fn init_logging(verbose: u8) -> Option<WorkerGuard> {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Scope the filter to our crates so sqlx and lettre stay quiet
    let directives = [
        "craftstats",
        "craftstats_core",
        "craftstats_credentials",
        "craftstats_db",
        "craftstats_report",
        "craftstats_mail",
        "craftstats_host",
    ]
    .iter()
    .map(|target| format!("{}={}", target, log_level))
    .collect::<Vec<_>>()
    .join(",");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| directives.into());

    if verbose == 0 {
        let appender = tracing_appender::rolling::never(".", LOG_FILE);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().without_time())
            .init();
        None
    }
}
