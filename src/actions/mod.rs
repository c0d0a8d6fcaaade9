use thiserror::Error;

pub mod completions;
pub mod target;

#[derive(Debug, Error)]
pub enum CliActionError {
    #[error("{0}")]
    ManagerError(#[from] crate::manager::ManagerError),

    #[error("{0}")]
    ConfigurationError(#[from] crate::configuration::ConfigurationError),

    #[error("{0}")]
    FormattingError(#[from] crate::format::FormattingError),

    #[error("{0}")]
    TargetError(#[from] crate::target::TargetError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("{0}")]
    BusinessLogicError(String),
}
