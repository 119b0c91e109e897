//! `artsweep`: delete GitHub Actions artifacts older than a retention window.
//!
//! ```bash
//! # Show what is stored
//! artsweep list
//!
//! # Delete everything created more than a week ago
//! artsweep sweep --days 7
//! ```
//!
//! Settings come from flags, environment variables, or a `.env` file; see
//! `artsweep --help`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod command;
mod config;
mod output;
mod sweep;
mod telemetry;

use std::process;

use anyhow::Context;
use artsweep_github::reqwest::GithubClient;
use jiff::Timestamp;

use crate::config::{Cli, Command};
use crate::output::Printer;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "artsweep_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "artsweep_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "artsweep_cli::config";
pub const TRACING_TARGET_SWEEP: &str = "artsweep_cli::sweep";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        let message = format!("{error:#}");
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %message,
            "artsweep terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();
    cli.validate().context("invalid configuration")?;

    let repository = cli.target.repository()?;
    let token = cli.target.token()?;

    let service = GithubClient::new(cli.github.clone())
        .context("failed to create GitHub client")?
        .into_service();
    let mut printer = Printer::stdout();

    match &cli.command {
        Command::List => command::list(&service, &repository, &token, &mut printer).await,
        Command::Sweep(args) => {
            let now = Timestamp::now();
            command::sweep(&service, &repository, &token, args, now, &mut printer).await?;
            Ok(())
        }
    }
}
