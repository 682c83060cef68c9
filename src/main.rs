use std::process::ExitCode;

use syslog_notify::cli::CliApp;

#[tokio::main]
async fn main() -> ExitCode {
    CliApp::run().await
}
