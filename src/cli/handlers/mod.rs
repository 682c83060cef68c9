//! Command handlers
//!
//! Each handler borrows the [`CliContext`] and owns one command.

pub mod caps;
pub mod config;
pub mod daemon;

use anyhow::Result;

use super::commands::{Commands, RunArgs};
use super::CliContext;

pub use caps::CapsHandler;
pub use config::ConfigHandler;
pub use daemon::DaemonHandler;
pub use test::TestHandler;

/// Routes a parsed command to its handler
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    pub async fn handle_command(&self, command: Option<Commands>, run: RunArgs) -> Result<()> {
        match command {
            None => DaemonHandler::new(&self.context).handle_run(run.foreground).await,
            Some(Commands::Caps) => CapsHandler::new(&self.context).handle_caps().await,
            Some(Commands::Test { message, title }) => {
                TestHandler::new(&self.context)
                    .handle_test(message, title)
                    .await
            }
            Some(Commands::Config { action }) => ConfigHandler::new(&self.context).handle_config(action),
        }
    }
}
