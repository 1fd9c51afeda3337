//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tenant
//! configuration or calculating an employee's monthly payroll.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// A failed calculation only ever affects one employee; the payroll run
/// that called the engine decides whether to abort or skip-and-report.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/statutory.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/statutory.yaml");
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

    /// A statutory configuration value is outside its legal range.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// No tenant configuration exists for the company code.
    #[error("Company not found: {code}")]
    CompanyNotFound {
        /// The company code that was not found.
        code: String,
    },

    /// The state is not one of the jurisdictions with a known PT table.
    #[error("Unsupported jurisdiction for professional tax: {state}")]
    UnsupportedJurisdiction {
        /// The state as supplied by the caller.
        state: String,
    },

    /// A payroll input field was malformed.
    #[error("Invalid input field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidInput`].
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidConfig`].
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
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
            path: "/missing/statutory.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/statutory.yaml"
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
    fn test_invalid_config_displays_field_and_message() {
        let error = EngineError::invalid_config("pf.employer_rate", "must be between 0 and 100");
        assert_eq!(
            error.to_string(),
            "Invalid configuration 'pf.employer_rate': must be between 0 and 100"
        );
    }

    #[test]
    fn test_company_not_found_displays_code() {
        let error = EngineError::CompanyNotFound {
            code: "unknown".to_string(),
        };
        assert_eq!(error.to_string(), "Company not found: unknown");
    }

    #[test]
    fn test_unsupported_jurisdiction_displays_state() {
        let error = EngineError::UnsupportedJurisdiction {
            state: "Atlantis".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unsupported jurisdiction for professional tax: Atlantis"
        );
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::invalid_input("attendance.unpaid_leave_days", "cannot be negative");
        assert_eq!(
            error.to_string(),
            "Invalid input field 'attendance.unpaid_leave_days': cannot be negative"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "decimal overflow".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: decimal overflow");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_company_not_found() -> EngineResult<()> {
            Err(EngineError::CompanyNotFound {
                code: "acme".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_company_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
