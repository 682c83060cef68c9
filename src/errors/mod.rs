//! Centralized error handling module
//!
//! Typed errors for every failure the daemon can hit, each mapped to a
//! process exit code.

pub mod context;
pub mod types;

pub use context::ErrorContextExt;
pub use types::{AppError, AppResult};

/// Convert from anyhow::Error to AppError at the CLI boundary
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<AppError>() {
            Ok(app_err) => app_err,
            Err(err) => AppError::Other {
                message: format!("{:#}", err),
                source: None,
            },
        }
    }
}
