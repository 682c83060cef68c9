//! CLI module providing command-line interface functionality
//!
//! This module handles argument parsing, configuration loading and routing
//! to handlers, and turns the outcome into a process exit status.

pub mod commands;
pub mod context;
pub mod handlers;

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use crate::errors::AppError;

pub use commands::{Cli, Commands, ConfigAction, RunArgs};
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments, execute the requested command and map
    /// any failure to its exit code
    pub async fn run() -> ExitCode {
        let cli = match Cli::try_parse() {
            Ok(cli) => cli,
            Err(e) => {
                // --help and --version are reported through the error path too
                let _ = e.print();
                return if e.use_stderr() {
                    ExitCode::from(1)
                } else {
                    ExitCode::SUCCESS
                };
            }
        };

        match Self::execute(cli).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                report_error(&e);
                ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
            }
        }
    }

    async fn execute(cli: Cli) -> Result<(), AppError> {
        let context = CliContext::new(&cli)?;
        let handler = CommandHandler::new(context);

        handler
            .handle_command(cli.command, cli.run)
            .await
            .map_err(AppError::from)
    }
}

fn report_error(e: &AppError) {
    error!("{}", e);
    eprintln!("Error: {}", e);

    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
