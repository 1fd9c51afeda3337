//! Shared state for the payroll API handlers.

use std::sync::Arc;

use crate::config::{CompanyConfig, ConfigLoader};
use crate::error::EngineResult;

/// Every tenant's statutory configuration, loaded once at startup and read
/// concurrently by the handlers.
#[derive(Clone)]
pub struct AppState {
    companies: Arc<ConfigLoader>,
}

impl AppState {
    /// Wraps the loaded company configurations.
    pub fn new(companies: ConfigLoader) -> Self {
        Self {
            companies: Arc::new(companies),
        }
    }

    /// Looks up a tenant by company code.
    pub fn company(&self, code: &str) -> EngineResult<&CompanyConfig> {
        self.companies.get_company(code)
    }

    /// Number of tenants being served.
    pub fn company_count(&self) -> usize {
        self.companies.company_codes().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_app_state_is_shareable() {
        fn assert_shareable<T: Clone + Send + Sync + 'static>() {}
        assert_shareable::<AppState>();
    }

    #[test]
    fn test_company_lookup() {
        let state = AppState::new(ConfigLoader::load("./config/companies").unwrap());

        assert_eq!(state.company_count(), 2);
        assert_eq!(state.company("acme_india").unwrap().code(), "acme_india");
        assert!(matches!(
            state.company("globex"),
            Err(EngineError::CompanyNotFound { .. })
        ));
    }
}
