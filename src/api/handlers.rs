//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_monthly_payroll;
use crate::config::CompanyConfig;
use crate::error::EngineResult;
use crate::models::PayrollCalculationResult;

use super::request::{CalculationRequest, EmployeeRequest, PayrollRunRequest};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, EmployeeOutcome, PayrollRunResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/run", post(run_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: ApiErrorResponse) -> Response {
    json_response(error.status, error.error)
}

/// Maps a body extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("INVALID_INPUT", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Resolves the tenant or produces the error response for an unknown code.
fn resolve_company<'a>(
    state: &'a AppState,
    company_code: &str,
    correlation_id: Uuid,
) -> Result<&'a CompanyConfig, Response> {
    state.company(company_code).map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            company_code = %company_code,
            "Company not found"
        );
        error_response(err.into())
    })
}

/// Runs one employee through the engine under the company's configuration.
fn calculate_employee(
    employee: EmployeeRequest,
    company: &CompanyConfig,
) -> EngineResult<PayrollCalculationResult> {
    let input = employee.into_input(company);
    calculate_monthly_payroll(&input)
}

/// Handler for POST /payroll/calculate.
///
/// Accepts a single employee and returns the payslip wrapped in an envelope.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let company = match resolve_company(&state, &request.company_code, correlation_id) {
        Ok(company) => company,
        Err(response) => return response,
    };

    let employee_id = request.employee.id.clone();
    let start_time = Instant::now();
    match calculate_employee(request.employee, company) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                company_code = %company.code(),
                employee_id = %employee_id,
                gross_salary = %result.gross_salary,
                net_pay = %result.net_pay,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(
                StatusCode::OK,
                CalculationResponse::new(company.code(), result),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %employee_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /payroll/run.
///
/// Calculates every employee independently. A failing employee is reported
/// in the response and does not stop the rest of the run.
async fn run_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRunRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let company = match resolve_company(&state, &request.company_code, correlation_id) {
        Ok(company) => company,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let outcomes: Vec<EmployeeOutcome> = request
        .employees
        .into_iter()
        .map(|employee| {
            let employee_id = employee.id.clone();
            match calculate_employee(employee, company) {
                Ok(result) => EmployeeOutcome::Success {
                    employee_id,
                    result: Box::new(result),
                },
                Err(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        employee_id = %employee_id,
                        error = %err,
                        "Employee skipped"
                    );
                    EmployeeOutcome::Failed {
                        employee_id,
                        error: ApiErrorResponse::from(err).error,
                    }
                }
            }
        })
        .collect();

    let response = PayrollRunResponse::new(company.code(), outcomes);
    info!(
        correlation_id = %correlation_id,
        company_code = %company.code(),
        succeeded = response.succeeded,
        failed = response.failed,
        total_net_pay = %response.total_net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Payroll run completed"
    );
    json_response(StatusCode::OK, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{Attendance, EarningsComponents};
    use axum::{body::Body, http::Request};
    use rust_decimal::Decimal;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/companies").expect("Failed to load config");
        AppState::new(config)
    }

    fn create_employee(id: &str) -> EmployeeRequest {
        EmployeeRequest {
            id: id.to_string(),
            earnings: EarningsComponents {
                basic: dec("15000"),
                hra: dec("6000"),
                da: Decimal::ZERO,
                special_allowance: dec("4000"),
                other: vec![],
            },
            annual_ctc: dec("360000"),
            attendance: Attendance::full(dec("22")),
            month: 4,
            state: None,
            deductions: None,
            other_deductions: vec![],
            pf: None,
            esi: None,
            tds: None,
        }
    }

    fn create_valid_request() -> CalculationRequest {
        CalculationRequest {
            company_code: "acme_india".to_string(),
            employee: create_employee("emp_001"),
        }
    }

    async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let (status, body) = post_json(router, "/payroll/calculate", body).await;
        assert_eq!(status, StatusCode::OK);

        let response: CalculationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.company_code, "acme_india");
        assert_eq!(response.result.employee_id, "emp_001");
        // 25000 gross, 1800 PF, no ESI above the ceiling, 200 Maharashtra PT
        assert_eq!(response.result.gross_salary, dec("25000"));
        assert_eq!(response.result.professional_tax.amount, dec("200"));
        assert_eq!(response.result.net_pay, dec("23000"));
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, body) =
            post_json(router, "/payroll/calculate", "{invalid json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_invalid_input() {
        let router = create_router(create_test_state());
        let body = r#"{
            "company_code": "acme_india",
            "employee": {
                "id": "emp_001",
                "annual_ctc": "360000",
                "attendance": {
                    "working_days": "22",
                    "present_days": "22",
                    "paid_leave_days": "0",
                    "unpaid_leave_days": "0"
                },
                "month": 4
            }
        }"#;

        let (status, body) = post_json(router, "/payroll/calculate", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("earnings"), "got: {}", error.message);
    }

    #[tokio::test]
    async fn test_unknown_company_returns_400() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.company_code = "globex".to_string();
        let body = serde_json::to_string(&request).unwrap();

        let (status, body) = post_json(router, "/payroll/calculate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "COMPANY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_month_returns_400() {
        let router = create_router(create_test_state());
        let mut request = create_valid_request();
        request.employee.month = 13;
        let body = serde_json::to_string(&request).unwrap();

        let (status, body) = post_json(router, "/payroll/calculate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_INPUT");
        assert!(error.message.contains("month"));
    }

    #[tokio::test]
    async fn test_payroll_run_skips_and_reports_failures() {
        let router = create_router(create_test_state());

        let mut bad = create_employee("emp_bad");
        bad.earnings.basic = dec("-1");
        let request = PayrollRunRequest {
            company_code: "acme_india".to_string(),
            employees: vec![create_employee("emp_001"), bad, create_employee("emp_003")],
        };
        let body = serde_json::to_string(&request).unwrap();

        let (status, body) = post_json(router, "/payroll/run", body).await;
        assert_eq!(status, StatusCode::OK);

        let response: PayrollRunResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.succeeded, 2);
        assert_eq!(response.failed, 1);
        assert_eq!(response.total_net_pay, dec("46000"));

        match &response.employees[1] {
            EmployeeOutcome::Failed { employee_id, error } => {
                assert_eq!(employee_id, "emp_bad");
                assert_eq!(error.code, "INVALID_INPUT");
            }
            other => panic!("Expected failed outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_identical_requests_produce_identical_results() {
        let state = create_test_state();
        let body = serde_json::to_string(&create_valid_request()).unwrap();

        let (_, first) =
            post_json(create_router(state.clone()), "/payroll/calculate", body.clone()).await;
        let (_, second) = post_json(create_router(state), "/payroll/calculate", body).await;

        let first: CalculationResponse = serde_json::from_slice(&first).unwrap();
        let second: CalculationResponse = serde_json::from_slice(&second).unwrap();
        assert_ne!(first.calculation_id, second.calculation_id);
        assert_eq!(first.result, second.result);
    }
}
