use thiserror::Error;

use crate::{
    actions::CliActionError, configuration::ConfigurationError, exit_codes::GlcliExitCode,
    format::FormattingError, manager::ManagerError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// Error when an unsupported or undefined subcommand is encountered
    #[error("Undefined or unsupported subcommand")]
    UnsupportedSubcommand(String),
    /// Error related to configuration loading or management
    #[error("Configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
    /// Error related to data formatting
    #[error("Formatting error: {0}")]
    FormattingError(#[from] FormattingError),

    #[error("{0}")]
    ActionError(#[from] CliActionError),
}

impl CliError {
    /// Get the appropriate exit code for this error
    ///
    /// Validation and hierarchy problems are usage errors; persistence
    /// failures are I/O errors; unreadable state or settings are
    /// configuration errors; landscape API failures mean the service was
    /// unavailable.
    pub fn exit_code(&self) -> GlcliExitCode {
        match self {
            CliError::UnsupportedSubcommand(_) => GlcliExitCode::UsageError,
            CliError::ConfigurationError(_) => GlcliExitCode::ConfigError,
            CliError::FormattingError(_) => GlcliExitCode::DataError,
            CliError::ActionError(action) => match action {
                CliActionError::ManagerError(ManagerError::Validation(_)) => {
                    GlcliExitCode::UsageError
                }
                CliActionError::ManagerError(ManagerError::Persistence(_)) => {
                    GlcliExitCode::IoError
                }
                CliActionError::ManagerError(ManagerError::Resolution(_)) => {
                    GlcliExitCode::ConfigError
                }
                CliActionError::ManagerError(ManagerError::Lookup(_)) => {
                    GlcliExitCode::Unavailable
                }
                CliActionError::ConfigurationError(_) => GlcliExitCode::ConfigError,
                CliActionError::FormattingError(_) => GlcliExitCode::DataError,
                CliActionError::TargetError(_) => GlcliExitCode::UsageError,
                CliActionError::IoError(_) => GlcliExitCode::IoError,
                CliActionError::BusinessLogicError(_) => GlcliExitCode::UsageError,
            },
        }
    }
}
