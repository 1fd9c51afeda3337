//! Indian states the engine knows Professional Tax rules for.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A state with a known Professional Tax position.
///
/// The enumeration is closed: a state that is not listed here has no
/// table, and callers must deal with that explicitly instead of taxing
/// at zero by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Maharashtra.
    Maharashtra,
    /// Karnataka.
    Karnataka,
    /// West Bengal.
    WestBengal,
    /// Telangana.
    Telangana,
    /// Andhra Pradesh.
    AndhraPradesh,
    /// Gujarat.
    Gujarat,
    /// Madhya Pradesh.
    MadhyaPradesh,
    /// Delhi (no Professional Tax).
    Delhi,
    /// Haryana (no Professional Tax).
    Haryana,
    /// Uttar Pradesh (no Professional Tax).
    UttarPradesh,
    /// Rajasthan (no Professional Tax).
    Rajasthan,
}

/// Lower-cases and strips whitespace, hyphens and underscores.
///
/// ```
/// use payroll_engine::models::normalize_state_key;
///
/// assert_eq!(normalize_state_key(" West-Bengal "), "westbengal");
/// assert_eq!(normalize_state_key("TAMIL_NADU"), "tamilnadu");
/// ```
pub fn normalize_state_key(state: &str) -> String {
    state
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

impl Jurisdiction {
    /// Every supported jurisdiction.
    pub fn all() -> &'static [Jurisdiction] {
        &[
            Jurisdiction::Maharashtra,
            Jurisdiction::Karnataka,
            Jurisdiction::WestBengal,
            Jurisdiction::Telangana,
            Jurisdiction::AndhraPradesh,
            Jurisdiction::Gujarat,
            Jurisdiction::MadhyaPradesh,
            Jurisdiction::Delhi,
            Jurisdiction::Haryana,
            Jurisdiction::UttarPradesh,
            Jurisdiction::Rajasthan,
        ]
    }

    /// Parses a free-form state name or its two-letter code.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Jurisdiction;
    ///
    /// assert_eq!(Jurisdiction::parse("maharashtra").unwrap(), Jurisdiction::Maharashtra);
    /// assert_eq!(Jurisdiction::parse("West Bengal").unwrap(), Jurisdiction::WestBengal);
    /// assert_eq!(Jurisdiction::parse("KA").unwrap(), Jurisdiction::Karnataka);
    /// assert!(Jurisdiction::parse("Atlantis").is_err());
    /// ```
    pub fn parse(state: &str) -> EngineResult<Jurisdiction> {
        let jurisdiction = match normalize_state_key(state).as_str() {
            "maharashtra" | "mh" => Jurisdiction::Maharashtra,
            "karnataka" | "ka" => Jurisdiction::Karnataka,
            "westbengal" | "wb" => Jurisdiction::WestBengal,
            "telangana" | "tg" | "ts" => Jurisdiction::Telangana,
            "andhrapradesh" | "ap" => Jurisdiction::AndhraPradesh,
            "gujarat" | "gj" => Jurisdiction::Gujarat,
            "madhyapradesh" | "mp" => Jurisdiction::MadhyaPradesh,
            "delhi" | "newdelhi" | "dl" => Jurisdiction::Delhi,
            "haryana" | "hr" => Jurisdiction::Haryana,
            "uttarpradesh" | "up" => Jurisdiction::UttarPradesh,
            "rajasthan" | "rj" => Jurisdiction::Rajasthan,
            _ => {
                return Err(EngineError::UnsupportedJurisdiction {
                    state: state.to_string(),
                });
            }
        };
        Ok(jurisdiction)
    }

    /// Human-readable state name.
    pub fn name(&self) -> &'static str {
        match self {
            Jurisdiction::Maharashtra => "Maharashtra",
            Jurisdiction::Karnataka => "Karnataka",
            Jurisdiction::WestBengal => "West Bengal",
            Jurisdiction::Telangana => "Telangana",
            Jurisdiction::AndhraPradesh => "Andhra Pradesh",
            Jurisdiction::Gujarat => "Gujarat",
            Jurisdiction::MadhyaPradesh => "Madhya Pradesh",
            Jurisdiction::Delhi => "Delhi",
            Jurisdiction::Haryana => "Haryana",
            Jurisdiction::UttarPradesh => "Uttar Pradesh",
            Jurisdiction::Rajasthan => "Rajasthan",
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_and_separator_insensitive() {
        for raw in ["Maharashtra", "MAHARASHTRA", " maha rashtra ", "maha-rashtra", "MH"] {
            assert_eq!(
                Jurisdiction::parse(raw).unwrap(),
                Jurisdiction::Maharashtra,
                "failed for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_parse_multi_word_states() {
        assert_eq!(
            Jurisdiction::parse("andhra_pradesh").unwrap(),
            Jurisdiction::AndhraPradesh
        );
        assert_eq!(
            Jurisdiction::parse("Madhya Pradesh").unwrap(),
            Jurisdiction::MadhyaPradesh
        );
        assert_eq!(
            Jurisdiction::parse("New Delhi").unwrap(),
            Jurisdiction::Delhi
        );
    }

    #[test]
    fn test_unknown_state_is_unsupported() {
        match Jurisdiction::parse("Goa") {
            Err(EngineError::UnsupportedJurisdiction { state }) => assert_eq!(state, "Goa"),
            other => panic!("Expected UnsupportedJurisdiction, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_state_is_unsupported() {
        assert!(Jurisdiction::parse("").is_err());
        assert!(Jurisdiction::parse("  ").is_err());
    }

    #[test]
    fn test_every_name_parses_back() {
        for jurisdiction in Jurisdiction::all() {
            assert_eq!(Jurisdiction::parse(jurisdiction.name()).unwrap(), *jurisdiction);
        }
    }

    #[test]
    fn test_serialization_is_snake_case() {
        let json = serde_json::to_string(&Jurisdiction::WestBengal).unwrap();
        assert_eq!(json, "\"west_bengal\"");
    }
}
