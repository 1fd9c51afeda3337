//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tenant
//! statutory configurations from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};

use super::types::{CompanyConfig, CompanyMetadata, StatutoryConfig};

/// Loads and provides access to every tenant's configuration.
///
/// # Directory Structure
///
/// The configuration root holds one directory per company:
/// ```text
/// config/companies/
/// ├── acme_india/
/// │   ├── company.yaml     # Company metadata
/// │   └── statutory.yaml   # PF, ESI, TDS and default deductions
/// └── deccan_textiles/
///     ├── company.yaml
///     └── statutory.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/companies").unwrap();
/// let company = loader.get_company("acme_india").unwrap();
/// println!("PF ceiling: {}", company.statutory().pf.ceiling);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    companies: BTreeMap<String, CompanyConfig>,
}

impl ConfigLoader {
    /// Loads every company directory under `path`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The root directory is missing or holds no company directories
    /// - Any required file is missing or contains invalid YAML
    /// - Any statutory value is out of range
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let root = path.as_ref();
        let root_str = root.display().to_string();

        let entries = fs::read_dir(root).map_err(|_| EngineError::ConfigNotFound {
            path: root_str.clone(),
        })?;

        let mut loader = Self::default();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: root_str.clone(),
            })?;
            let dir = entry.path();
            if dir.is_dir() {
                loader.insert(Self::load_company(&dir)?);
            }
        }

        if loader.companies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no company directories found)", root_str),
            });
        }

        info!(
            companies = loader.companies.len(),
            path = %root_str,
            "Loaded company configurations"
        );
        Ok(loader)
    }

    /// Loads a single company directory.
    pub fn load_company<P: AsRef<Path>>(path: P) -> EngineResult<CompanyConfig> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;

        let statutory_path = path.join("statutory.yaml");
        let statutory = Self::load_yaml::<StatutoryConfig>(&statutory_path)?;
        statutory.validate().map_err(|err| match err {
            EngineError::InvalidConfig { field, message }
            | EngineError::InvalidInput { field, message } => EngineError::InvalidConfig {
                field: format!("{}: {}", metadata.code, field),
                message,
            },
            other => EngineError::ConfigParseError {
                path: statutory_path.display().to_string(),
                message: other.to_string(),
            },
        })?;

        Ok(CompanyConfig::new(metadata, statutory))
    }

    /// Builds a loader from already-constructed configurations.
    pub fn from_companies(companies: impl IntoIterator<Item = CompanyConfig>) -> Self {
        let mut loader = Self::default();
        for company in companies {
            loader.insert(company);
        }
        loader
    }

    fn insert(&mut self, company: CompanyConfig) {
        self.companies.insert(company.code().to_string(), company);
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a company by its code.
    ///
    /// Returns `CompanyNotFound` when no tenant has that code.
    pub fn get_company(&self, code: &str) -> EngineResult<&CompanyConfig> {
        self.companies
            .get(code)
            .ok_or_else(|| EngineError::CompanyNotFound {
                code: code.to_string(),
            })
    }

    /// Codes of every loaded company, in sorted order.
    pub fn company_codes(&self) -> impl Iterator<Item = &str> {
        self.companies.keys().map(String::as_str)
    }
}
