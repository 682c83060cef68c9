//! Notification server capabilities

use anyhow::Result;

use super::super::CliContext;
use crate::notify::create_client;
use crate::syslog::MarkupFilter;

pub struct CapsHandler<'a> {
    context: &'a CliContext,
}

impl<'a> CapsHandler<'a> {
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Print each advertised capability on its own line, then the markup
    /// handling the daemon would pick for this server
    pub async fn handle_caps(&self) -> Result<()> {
        let client = create_client(self.context.dry_run);
        let capabilities = client.capabilities().await?;

        for capability in &capabilities {
            println!("{}", capability);
        }

        let filter = MarkupFilter::resolve(self.context.config.notify.markup, &capabilities);
        eprintln!(
            "Markup escaping: {}",
            if filter.is_active() { "on" } else { "off" }
        );
        Ok(())
    }
}
