//! CLI-level errors (wraps projection and settings errors)

use thiserror::Error;

use crate::application::ProjectionError;
use crate::config::SettingsError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Projection(#[from] ProjectionError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON input: {0}")]
    InvalidInput(#[source] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::InvalidInput(_) => crate::exitcode::DATAERR,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => crate::exitcode::NOINPUT,
                _ => crate::exitcode::IOERR,
            },
            CliError::Projection(e) => match e {
                ProjectionError::Decode { .. }
                | ProjectionError::Shape { .. }
                | ProjectionError::DepthExceeded { .. } => crate::exitcode::DATAERR,
                ProjectionError::Encode(_) | ProjectionError::Domain(_) => {
                    crate::exitcode::SOFTWARE
                }
            },
        }
    }
}
