//! Error types for session state operations
//!
//! Normal use of the session never fails: absent paths read as `None` and
//! writes overwrite. Errors only arise from configured limits, malformed
//! editor input and serialization of injected fields.

use std::error::Error as StdError;
use thiserror::Error;

/// Errors that can occur in session state operations
#[derive(Debug, Error)]
pub enum StateError {
    /// Write rejected by the configured size limit
    #[error("File {path} is {size} bytes, exceeding the {limit} byte limit")]
    FileTooLarge {
        path: String,
        size: usize,
        limit: usize,
    },

    /// No content stored at the path
    #[error("File not found: {0}")]
    NotFound(String),

    /// Line index past the end of the file
    #[error("Line {line} is out of range for {path} ({line_count} lines)")]
    LineOutOfRange {
        path: String,
        line: usize,
        line_count: usize,
    },

    /// Inventory already holds the configured maximum
    #[error("Inventory is full ({limit} items)")]
    InventoryFull { limit: usize },

    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StateError {
    /// Get the canonical error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::FileTooLarge { .. } => "E_FILE_TOO_LARGE",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::LineOutOfRange { .. } => "E_LINE_OUT_OF_RANGE",
            Self::InventoryFull { .. } => "E_INVENTORY_FULL",
            Self::Validation(_) => "E_VALIDATION",
            Self::Config(_) => "E_CONFIG",
            Self::Serialization(_) => "E_SERIALIZATION",
        }
    }
}

/// Result type for session state operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Format an error chain as a multi-line string
///
/// Walks the chain via `source()`, one indented line per cause.
pub fn format_error_chain(error: &dyn StdError) -> String {
    let mut result = format!("Error: {}", error);
    let mut current = error.source();
    let mut level = 1;

    while let Some(source) = current {
        result.push_str(&format!(
            "\n{:indent$}Caused by: {}",
            "",
            source,
            indent = level * 2
        ));
        current = source.source();
        level += 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = StateError::FileTooLarge {
            path: "/tmp/a".into(),
            size: 10,
            limit: 4,
        };
        assert_eq!(err.error_code(), "E_FILE_TOO_LARGE");
        assert_eq!(
            StateError::InventoryFull { limit: 3 }.error_code(),
            "E_INVENTORY_FULL"
        );
        assert_eq!(StateError::NotFound("/a".into()).error_code(), "E_NOT_FOUND");
        assert_eq!(
            StateError::Validation("x".into()).error_code(),
            "E_VALIDATION"
        );
    }

    #[test]
    fn test_error_display() {
        let err = StateError::FileTooLarge {
            path: "/tmp/a".into(),
            size: 10,
            limit: 4,
        };
        assert_eq!(
            err.to_string(),
            "File /tmp/a is 10 bytes, exceeding the 4 byte limit"
        );
        assert_eq!(
            StateError::InventoryFull { limit: 3 }.to_string(),
            "Inventory is full (3 items)"
        );
    }

    #[test]
    fn test_single_error_chain() {
        let err = StateError::Config("feed_limit must be non-zero".into());
        assert_eq!(
            format_error_chain(&err),
            "Error: Configuration error: feed_limit must be non-zero"
        );
    }

    #[test]
    fn test_serialization_chain_has_cause() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StateError::from(json_err);
        let formatted = format_error_chain(&err);
        assert!(formatted.starts_with("Error: Serialization error:"));
        // thiserror's #[from] wires the source
        assert!(formatted.contains("Caused by:"));
    }
}
