//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for calculating a single
//! employee's payslip and for running payroll over a batch of employees.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmployeeRequest, PayrollRunRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, EmployeeOutcome, PayrollRunResponse,
};
pub use state::AppState;
