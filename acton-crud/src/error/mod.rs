//! Error types and error handling

use thiserror::Error;

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, CrudError>;

/// Framework error type
#[derive(Debug, Error)]
pub enum CrudError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema or UI schema could not be read into typed records
    #[error("Schema error: {0}")]
    Schema(#[from] serde_json::Error),

    /// A commit was requested while the matching dialog was not open
    #[error("Invalid transition: cannot {action} while dialog is {state}")]
    InvalidTransition {
        /// Attempted action (e.g. `commit_create`)
        action: &'static str,
        /// Dialog kind at the time of the attempt
        state: crate::dialog::DialogKind,
    },

    /// Another resource already claimed this title in the action registry
    #[error("Action collision: resource title '{0}' is already registered with a different schema")]
    ActionCollision(String),

    /// Resource title cannot be used as an action namespace
    #[error("Invalid resource title '{title}': {reason}")]
    InvalidResourceTitle {
        /// Offending title
        title: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Origin could not be parsed into scheme and host
    #[error("Invalid origin '{input}': {reason}")]
    InvalidOrigin {
        /// Offending input
        input: String,
        /// Parser message
        reason: String,
    },

    /// Stored field value is not a date-time the form can merge into
    #[error("Invalid date-time in field '{field}': {value}")]
    InvalidDateTime {
        /// Field name
        field: String,
        /// Stored value
        value: String,
    },
}

impl From<figment::Error> for CrudError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogKind;

    #[test]
    fn test_invalid_transition_message() {
        let err = CrudError::InvalidTransition {
            action: "commit_destroy",
            state: DialogKind::Hidden,
        };
        assert_eq!(
            err.to_string(),
            "Invalid transition: cannot commit_destroy while dialog is Hidden"
        );
    }

    #[test]
    fn test_schema_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CrudError = json_err.into();
        assert!(matches!(err, CrudError::Schema(_)));
        assert!(err.to_string().starts_with("Schema error:"));
    }
}
