//! Custom exit codes for the glcli application
//!
//! This module defines specific exit codes for different error conditions
//! to make scripting and automation easier.

/// Custom exit codes for glcli
///
/// These codes follow the BSD sysexits.h conventions:
/// - 0: Success
/// - 64-78: Standard exit codes from sysexits.h
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlcliExitCode {
    /// Success (0) - Command completed successfully
    Success = 0,

    /// Command line usage error (64) - User input error
    UsageError = 64,

    /// Data format error (65) - Input data was incorrect
    DataError = 65,

    /// Service unavailable (69) - The landscape API could not be consulted
    Unavailable = 69,

    /// Internal software error (70) - Unexpected application error
    SoftwareError = 70,

    /// I/O error (74) - The target state could not be persisted
    IoError = 74,

    /// Configuration error (78) - Settings or persisted state unusable
    ConfigError = 78,
}

impl GlcliExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Get descriptive message for the exit code
    pub fn message(&self) -> &'static str {
        match self {
            GlcliExitCode::Success => "Success",
            GlcliExitCode::UsageError => "Command line usage error",
            GlcliExitCode::DataError => "Data format error",
            GlcliExitCode::Unavailable => "Service unavailable",
            GlcliExitCode::SoftwareError => "Internal software error",
            GlcliExitCode::IoError => "Input/output error",
            GlcliExitCode::ConfigError => "Configuration error",
        }
    }
}

impl From<GlcliExitCode> for i32 {
    fn from(code: GlcliExitCode) -> Self {
        code.code()
    }
}
