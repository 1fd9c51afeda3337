//! Configuration loading and management for the payroll engine.
//!
//! This module loads each tenant's statutory configuration (PF, ESI, TDS
//! and default deductions) from YAML files. Configurations are handed to
//! every calculation as values; there is no process-wide default.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/companies").unwrap();
//! println!("Loaded: {}", config.get_company("acme_india").unwrap().company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanyConfig, CompanyMetadata, StatutoryConfig};
