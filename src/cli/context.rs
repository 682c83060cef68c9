//! CLI context holding the effective configuration
//!
//! The context resolves the config file, applies command-line overrides and
//! validates the result once, before anything touches the FIFO.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use super::commands::Cli;
use crate::config::{Config, ConfigManager};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct CliContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub verbose: bool,
    pub dry_run: bool,
}

impl CliContext {
    pub fn new(cli: &Cli) -> AppResult<Self> {
        let manager = ConfigManager::load(cli.config.clone())?;
        let config_path = manager.config_path().map(|p| p.to_path_buf());

        let mut config = manager.into_config();
        config.apply_overrides(&cli.run.overrides());
        config.validate()?;

        Ok(Self {
            config,
            config_path,
            verbose: cli.verbose,
            dry_run: cli.dry_run,
        })
    }

    /// Initialize logging
    ///
    /// Console output goes to stderr so dry-run notifications on stdout stay
    /// clean. A configured `log_path` adds a daily rolling file; background
    /// daemons log to that file only. Keep the returned guard alive for as
    /// long as the process logs.
    pub fn init_logging(&self, background: bool) -> AppResult<Option<WorkerGuard>> {
        let log_level = if self.verbose {
            "debug"
        } else {
            self.config.daemon.log_level.as_str()
        };
        let env_filter = || {
            EnvFilter::from_default_env().add_directive(
                log_level
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            )
        };

        let Some(log_path) = self.config.daemon.log_path() else {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(env_filter())
                .try_init()
                .map_err(|e| AppError::internal(format!("failed to init logging: {}", e)))?;
            return Ok(None);
        };

        let directory = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&directory)
            .map_err(|e| AppError::io_with_source(&directory, "create log directory", e))?;
        let file_name = log_path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "syslog-notify.log".into());

        let file_appender = tracing_appender::rolling::daily(&directory, file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false);

        let console_layer = (!background)
            .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

        tracing_subscriber::registry()
            .with(env_filter())
            .with(file_layer)
            .with(console_layer)
            .try_init()
            .map_err(|e| AppError::internal(format!("failed to init logging: {}", e)))?;

        tracing::debug!("Logging to {}", log_path.display());
        Ok(Some(guard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn test_context_applies_flags_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[flood]\ncount = 4\n[daemon]\nwait_secs = 9\n").unwrap();

        let cli = Cli::try_parse_from([
            "syslog-notify",
            "--config",
            path.to_str().unwrap(),
            "-c",
            "6",
        ])
        .unwrap();
        let context = CliContext::new(&cli).unwrap();

        assert_eq!(context.config_path, Some(path));
        assert_eq!(context.config.flood.threshold(), Some(6));
        assert_eq!(context.config.daemon.wait_secs, 9);
    }

    #[test]
    fn test_context_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[daemon]\nmax_message_size = 1\n").unwrap();

        let cli = Cli::try_parse_from(["syslog-notify", "--config", path.to_str().unwrap()]).unwrap();
        let result = CliContext::new(&cli);
        assert!(matches!(result, Err(AppError::InvalidConfigValue { .. })));
    }
}
