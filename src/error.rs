//! Error types for the PNG tax engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading the statutory
//! schedule or computing tax.

use thiserror::Error;

/// The main error type for the PNG tax engine.
///
/// Input errors are caller contract violations and never produce a partial
/// result. Configuration errors are fatal: an engine whose schedule failed to
/// load must not accept calculations.
///
/// # Example
///
/// ```
/// use png_tax_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/brackets.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/brackets.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The schedule parsed but its contents are not a usable tax table.
    #[error("Invalid tax schedule: {message}")]
    InvalidConfiguration {
        /// A description of what is wrong with the schedule.
        message: String,
    },

    /// A calculation input violated the engine's contract.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true for the configuration family of errors.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EngineError::ConfigNotFound { .. }
                | EngineError::ConfigParseError { .. }
                | EngineError::InvalidConfiguration { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/brackets.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/brackets.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_configuration_displays_message() {
        let error = EngineError::InvalidConfiguration {
            message: "no bands defined".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid tax schedule: no bands defined");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("income", "must not be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input field 'income': must not be negative"
        );
    }

    #[test]
    fn test_configuration_family() {
        assert!(
            EngineError::ConfigNotFound {
                path: "x".to_string()
            }
            .is_configuration_error()
        );
        assert!(
            EngineError::InvalidConfiguration {
                message: "x".to_string()
            }
            .is_configuration_error()
        );
        assert!(!EngineError::invalid_input("income", "negative").is_configuration_error());
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_input() -> EngineResult<()> {
            Err(EngineError::invalid_input("dependants", "must be between 0 and 3"))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_input()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
