//! Response types for the payroll engine API.
//!
//! This module defines the success envelopes, the error response structures
//! and the mapping from [`EngineError`] to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PayrollCalculationResult;

/// Envelope returned by `/payroll/calculate`.
///
/// The identifier and timestamp live here rather than in the result so that
/// identical inputs produce identical results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that performed the calculation.
    pub engine_version: String,
    /// The tenant the calculation ran under.
    pub company_code: String,
    /// The payslip.
    pub result: PayrollCalculationResult,
}

impl CalculationResponse {
    /// Wraps a result in a fresh envelope.
    pub fn new(company_code: impl Into<String>, result: PayrollCalculationResult) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            company_code: company_code.into(),
            result,
        }
    }
}

/// Outcome for one employee within a payroll run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EmployeeOutcome {
    /// The payslip was calculated.
    Success {
        /// The employee identifier.
        employee_id: String,
        /// The payslip.
        result: Box<PayrollCalculationResult>,
    },
    /// The employee was skipped.
    Failed {
        /// The employee identifier.
        employee_id: String,
        /// Why the calculation failed.
        error: ApiError,
    },
}

/// Envelope returned by `/payroll/run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRunResponse {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that performed the run.
    pub engine_version: String,
    /// The tenant the run executed under.
    pub company_code: String,
    /// Number of employees calculated successfully.
    pub succeeded: usize,
    /// Number of employees skipped due to errors.
    pub failed: usize,
    /// Sum of net pay across the successful employees.
    pub total_net_pay: Decimal,
    /// Per-employee outcomes, in request order.
    pub employees: Vec<EmployeeOutcome>,
}

impl PayrollRunResponse {
    /// Builds the envelope and its summary counts from the outcomes.
    pub fn new(company_code: impl Into<String>, employees: Vec<EmployeeOutcome>) -> Self {
        let mut succeeded = 0;
        let mut total_net_pay = Decimal::ZERO;
        for outcome in &employees {
            if let EmployeeOutcome::Success { result, .. } = outcome {
                succeeded += 1;
                total_net_pay += result.net_pay;
            }
        }

        Self {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            company_code: company_code.into(),
            succeeded,
            failed: employees.len() - succeeded,
            total_net_pay,
            employees,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a company not found error response.
    pub fn company_not_found(code: &str) -> Self {
        Self::with_details(
            "COMPANY_NOT_FOUND",
            format!("Company not found: {}", code),
            format!("No statutory configuration is loaded for company '{}'", code),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::CompanyNotFound { code } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::company_not_found(&code),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CONFIG",
                    format!("Invalid configuration '{}': {}", field, message),
                    "A statutory rate or ceiling is outside its allowed range",
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input field '{}': {}", field, message),
                    "The employee data contains invalid information",
                ),
            },
            EngineError::UnsupportedJurisdiction { state } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new(
                    "UNSUPPORTED_JURISDICTION",
                    format!("Unsupported jurisdiction: {}", state),
                ),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_company_not_found_error() {
        let error = ApiError::company_not_found("globex");
        assert_eq!(error.code, "COMPANY_NOT_FOUND");
        assert!(error.message.contains("globex"));
    }

    #[test]
    fn test_engine_error_to_api_error() {
        let api_error: ApiErrorResponse = EngineError::CompanyNotFound {
            code: "globex".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "COMPANY_NOT_FOUND");

        let api_error: ApiErrorResponse = EngineError::invalid_input("month", "bad").into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INPUT");

        let api_error: ApiErrorResponse = EngineError::CalculationError {
            message: "overflow".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_run_response_counts() {
        let outcomes = vec![EmployeeOutcome::Failed {
            employee_id: "emp_bad".to_string(),
            error: ApiError::new("INVALID_INPUT", "negative basic"),
        }];
        let response = PayrollRunResponse::new("acme_india", outcomes);

        assert_eq!(response.succeeded, 0);
        assert_eq!(response.failed, 1);
        assert_eq!(response.total_net_pay, Decimal::ZERO);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["employees"][0]["status"], "failed");
    }
}
