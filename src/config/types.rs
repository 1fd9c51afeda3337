//! Configuration types for tenant statutory settings.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from each company's YAML files.

use serde::Deserialize;

use crate::error::EngineResult;
use crate::models::{EsiConfig, PfConfig, TdsConfig, TdsDeductions};

/// Metadata about a company (tenant).
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// Short code identifying the tenant (e.g., "acme_india").
    pub code: String,
    /// The registered company name.
    pub name: String,
    /// State used for Professional Tax when an employee has none on record.
    #[serde(default)]
    pub registered_state: Option<String>,
}

/// Statutory configuration from statutory.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryConfig {
    /// Provident Fund settings.
    pub pf: PfConfig,
    /// ESI settings.
    pub esi: EsiConfig,
    /// Default TDS settings.
    pub tds: TdsConfig,
    /// Deductions assumed when an employee declares none.
    #[serde(default)]
    pub default_deductions: TdsDeductions,
}

impl StatutoryConfig {
    /// Checks every statutory value against its legal range.
    pub fn validate(&self) -> EngineResult<()> {
        self.pf.validate()?;
        self.esi.validate()?;
        self.default_deductions.validate()?;
        Ok(())
    }
}

/// The complete configuration for one company, loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CompanyConfig {
    /// Company metadata.
    metadata: CompanyMetadata,
    /// Statutory settings.
    statutory: StatutoryConfig,
}

impl CompanyConfig {
    /// Creates a new CompanyConfig from its component parts.
    pub fn new(metadata: CompanyMetadata, statutory: StatutoryConfig) -> Self {
        Self {
            metadata,
            statutory,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.metadata
    }

    /// Returns the company code.
    pub fn code(&self) -> &str {
        &self.metadata.code
    }

    /// Returns the statutory configuration.
    pub fn statutory(&self) -> &StatutoryConfig {
        &self.statutory
    }
}
