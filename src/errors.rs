//! Shared error types for the scoring engine.

use serde::Serialize;
use thiserror::Error;

/// Main error type for talentmap operations.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum TalentmapError {
    /// A required employee field is missing or invalid
    #[error("Validation error for employee {employee_id:?}: {message}")]
    Validation {
        message: String,
        employee_id: Option<String>,
    },

    /// Input has the wrong shape (e.g. roster exceeds the overlap guard)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration rejected at construction time
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TalentmapError {
    pub fn validation(message: impl Into<String>, employee_id: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            employee_id: employee_id.map(String::from),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Per-record validation failures are recoverable in batch processing;
    /// configuration errors are not.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, TalentmapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_carries_employee_id() {
        let err = TalentmapError::validation("missing id", Some("E042"));
        assert!(err.is_validation());
        assert!(err.to_string().contains("E042"));
    }

    #[test]
    fn test_config_error_is_not_validation() {
        let err = TalentmapError::config("empty weight table");
        assert!(!err.is_validation());
    }
}
