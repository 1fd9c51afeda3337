//! Statutory payroll engine for Indian payroll
//!
//! This crate converts an employee's monthly earnings and attendance into a
//! legally compliant payslip: Loss of Pay proration, Provident Fund, Employee
//! State Insurance, state Professional Tax and annualized income tax
//! withholding under the old and new regimes. Every figure carries an audit
//! trace describing how it was derived.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
