//! Configuration inspection handler

use anyhow::{Context, Result};

use super::super::{CliContext, ConfigAction};
use crate::config::ConfigManager;
use crate::errors::AppError;

/// Handler for configuration operations
pub struct ConfigHandler<'a> {
    context: &'a CliContext,
}

impl<'a> ConfigHandler<'a> {
    /// Create new configuration handler
    pub fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Handle configuration management
    pub fn handle_config(&self, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Show => {
                match &self.context.config_path {
                    Some(path) => println!("# source: {}", path.display()),
                    None => println!("# source: built-in defaults"),
                }
                let rendered = toml::to_string_pretty(&self.context.config)
                    .context("Failed to serialize configuration")?;
                print!("{}", rendered);
            }
            ConfigAction::Path => {
                let path = self
                    .context
                    .config_path
                    .clone()
                    .or_else(ConfigManager::default_config_path)
                    .ok_or_else(|| AppError::config("could not determine a configuration directory"))?;
                println!("{}", path.display());
            }
        }
        Ok(())
    }
}
