use crate::errors::{AppError, AppResult, ErrorContextExt};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_FIFO: &str = "/var/spool/syslog-notify";
pub const APP_NAME: &str = "syslog-notify";

/// Linux `PIPE_BUF`, the largest write a FIFO delivers atomically
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4096;
pub const MIN_MESSAGE_SIZE: usize = 64;
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Main configuration structure
///
/// Every section falls back to its defaults when missing from the file, so a
/// config file only needs to name the values it changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fifo: FifoConfig,
    pub flood: FloodConfig,
    pub notify: NotifyConfig,
    pub daemon: DaemonConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FifoConfig {
    pub path: PathBuf,
    /// Discard whatever syslog queued while the daemon was not running
    pub drain_on_start: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodConfig {
    /// Combine notifications when a single read holds at least this many
    /// lines; 0 and 1 disable detection
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    pub app_name: String,
    pub urgency_detection: bool,
    /// Milliseconds; negative means the server's default expiry
    pub expire_timeout_ms: i32,
    pub markup: MarkupMode,
    pub on_dispatch_failure: FailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    pub wait_secs: u64,
    pub max_message_size: usize,
    pub log_level: String,
    /// Empty means console logging only
    pub log_path: String,
}

/// How markup characters in messages are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupMode {
    /// Pass text through when the server advertises `body-markup`,
    /// escape it otherwise
    #[default]
    Auto,
    Escape,
    Raw,
    /// Escape only for servers that advertise `body-markup`, as classic
    /// syslog-notify releases did
    #[serde(rename = "escape-for-markup")]
    EscapeForMarkup,
}

/// What the read loop does when the notification service rejects a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop reading and shut the daemon down
    #[default]
    Exit,
    /// Log the failure and keep going
    Skip,
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_FIFO),
            drain_on_start: true,
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            urgency_detection: false,
            expire_timeout_ms: -1,
            markup: MarkupMode::Auto,
            on_dispatch_failure: FailurePolicy::Exit,
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            wait_secs: 0,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            log_level: "info".to_string(),
            log_path: String::new(),
        }
    }
}

impl FloodConfig {
    /// Line count that switches a read into combined mode, if enabled
    pub fn threshold(&self) -> Option<usize> {
        (self.count >= 2).then_some(self.count)
    }
}

impl DaemonConfig {
    pub fn log_path(&self) -> Option<PathBuf> {
        (!self.log_path.is_empty()).then(|| PathBuf::from(&self.log_path))
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub fifo: Option<PathBuf>,
    pub flood_count: Option<usize>,
    pub wait_secs: Option<u64>,
    pub urgency: bool,
}

impl Config {
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref path) = overrides.fifo {
            self.fifo.path = path.clone();
        }
        if let Some(count) = overrides.flood_count {
            self.flood.count = count;
        }
        if let Some(wait) = overrides.wait_secs {
            self.daemon.wait_secs = wait;
        }
        if overrides.urgency {
            self.notify.urgency_detection = true;
        }
    }

    /// Check limits that the read loop relies on
    pub fn validate(&self) -> AppResult<()> {
        let size = self.daemon.max_message_size;
        if !(MIN_MESSAGE_SIZE..=MAX_MESSAGE_SIZE).contains(&size) {
            return Err(AppError::invalid_value("daemon.max_message_size", size));
        }
        if self.flood.count > size {
            return Err(AppError::invalid_value("flood.count", self.flood.count));
        }
        if self.notify.app_name.trim().is_empty() {
            return Err(AppError::invalid_value("notify.app_name", "<empty>"));
        }
        if self.fifo.path.as_os_str().is_empty() {
            return Err(AppError::invalid_value("fifo.path", "<empty>"));
        }
        Ok(())
    }
}

/// Locates and loads the configuration file
///
/// # Resolution order
///
/// 1. An explicit path, which must exist
/// 2. `$XDG_CONFIG_HOME/syslog-notify/config.toml`, when present
/// 3. Built-in defaults
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    config: Config,
}

impl ConfigManager {
    pub fn load(explicit_path: Option<PathBuf>) -> AppResult<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(AppError::ConfigNotFound { path });
            }
            let config = Self::read(&path)?;
            return Ok(Self {
                config_path: Some(path),
                config,
            });
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => {
                let config = Self::read(&path)?;
                Ok(Self {
                    config_path: Some(path),
                    config,
                })
            }
            _ => Ok(Self {
                config_path: None,
                config: Config::default(),
            }),
        }
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn read(path: &Path) -> AppResult<Config> {
        let content = fs::read_to_string(path).in_file_operation(path, "read config file")?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Path the configuration was loaded from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
