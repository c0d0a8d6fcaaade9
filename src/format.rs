//! Formatting utilities for the garden landscape CLI.
//!
//! This module provides functionality for formatting output in the
//! supported formats: JSON, YAML, and plain text.

use std::str::FromStr;

pub const JSON: &str = "json";
pub const YAML: &str = "yaml";
pub const TEXT: &str = "text";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    /// Error when an unsupported output format is requested
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),

    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerializationError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputFormatOptions {
    pub pretty: bool,
}

/// Enum representing the supported output formats
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    /// JSON (JavaScript Object Notation) format
    Json(OutputFormatOptions),
    /// YAML format, matching the persisted document form
    Yaml,
    /// Human-readable single-line text
    Text,
}

impl OutputFormat {
    /// Returns all supported format names
    pub fn names() -> Vec<&'static str> {
        vec![TEXT, JSON, YAML]
    }

    pub fn from_string_with_options(
        format_str: &str,
        options: OutputFormatOptions,
    ) -> Result<OutputFormat, FormattingError> {
        match format_str.to_lowercase().as_str() {
            JSON => Ok(OutputFormat::Json(options)),
            YAML => Ok(OutputFormat::Yaml),
            TEXT => Ok(OutputFormat::Text),
            other => Err(FormattingError::UnsupportedOutputFormat(other.to_string())),
        }
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Text
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Json(_) => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        Self::from_string_with_options(format_str, OutputFormatOptions::default())
    }
}

/// Trait for formatting data in different output formats
pub trait Formattable {
    fn format(&self, f: &OutputFormat) -> Result<String, FormattingError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_are_parseable() {
        for name in OutputFormat::names() {
            assert!(OutputFormat::from_str(name).is_ok());
        }
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(matches!(
            OutputFormat::from_str("csv"),
            Err(FormattingError::UnsupportedOutputFormat(_))
        ));
    }

    #[test]
    fn test_parsing_is_case_insensitive() {
        assert_eq!(
            OutputFormat::from_str("YAML").unwrap(),
            OutputFormat::Yaml
        );
    }
}
