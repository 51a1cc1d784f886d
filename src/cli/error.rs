//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Arguments that clap accepts but `execute_command` cannot act on,
    /// e.g. a `Cli` parsed with `--info` handed to it by a library caller.
    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(DomainError::NumeralConversion { .. }) => {
                    crate::exitcode::DATAERR
                }
                ApplicationError::Domain(DomainError::InvalidStyle { .. })
                | ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                ApplicationError::InputUnreadable(_) => crate::exitcode::NOINPUT,
                ApplicationError::OutputNotWritable(_) | ApplicationError::OutputExists(_) => {
                    crate::exitcode::CANTCREAT
                }
                ApplicationError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}
