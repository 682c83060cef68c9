//! Command definitions and structures for the CLI
//!
//! Running without a subcommand starts the daemon; the short flags match the
//! classic `syslog-notify [-n] [-f fifoname] [-c count] [-u] [-w waittime]`
//! interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "syslog-notify")]
#[command(about = "Sends syslog messages to Desktop Notifications")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Configuration file (default: $XDG_CONFIG_HOME/syslog-notify/config.toml)
    #[arg(long, global = true, env = "SYSLOG_NOTIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print notifications to stdout instead of the desktop
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Daemon options
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Do not daemonize, but stay as foreground process
    #[arg(short = 'n', long)]
    pub foreground: bool,

    /// Get syslog data from this FIFO
    #[arg(short = 'f', long = "fifo", value_name = "FIFONAME")]
    pub fifo: Option<PathBuf>,

    /// Enable flood detection if a read holds at least this many messages
    #[arg(short = 'c', long = "flood-count", value_name = "COUNT")]
    pub flood_count: Option<usize>,

    /// Seconds to wait between successive reads of the FIFO
    #[arg(short = 'w', long = "wait", value_name = "WAITTIME")]
    pub wait: Option<u64>,

    /// Set notification urgency based on message keywords
    #[arg(short = 'u', long)]
    pub urgency: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            fifo: self.fifo.clone(),
            flood_count: self.flood_count,
            wait_secs: self.wait,
            urgency: self.urgency,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the capabilities of the notification server
    Caps,

    /// Send a test notification
    Test {
        /// Message to send
        message: String,

        /// Optional title
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Print where the configuration file is looked up
    Path,
}
