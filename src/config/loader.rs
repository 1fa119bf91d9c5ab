//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company override
//! files from YAML.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::CompanyOverride;

/// Loads company override files.
///
/// # Directory Structure
///
/// A settings directory holds one file per company, named after the company id:
/// ```text
/// config/companies/
/// ├── acme.yaml
/// └── globex.yaml
/// ```
///
/// Each file may carry any subset of `pension_administrators`,
/// `family_allowance_brackets` and `income_limits`. A table that is present
/// replaces the legal default in full.
///
/// # Example
///
/// ```no_run
/// use liquidation_engine::config::{ConfigLoader, ConfigurationMerger};
///
/// let company = ConfigLoader::load_override("./config/companies/acme.yaml")?;
/// let config = ConfigurationMerger::merge(Some(&company));
/// # Ok::<(), liquidation_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates a single company override file.
    ///
    /// # Returns
    ///
    /// Returns the override on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A table is inconsistent (`InvalidConfig`)
    pub fn load_override<P: AsRef<Path>>(path: P) -> EngineResult<CompanyOverride> {
        let company_override = Self::load_yaml::<CompanyOverride>(path.as_ref())?;
        Self::validate(&company_override)?;
        Ok(company_override)
    }

    /// Loads every `*.yaml` override in a directory, keyed by file stem.
    pub fn load_directory<P: AsRef<Path>>(dir: P) -> EngineResult<HashMap<String, CompanyOverride>> {
        let dir = dir.as_ref();
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut overrides = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let Some(company_id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                let company_id = company_id.to_string();
                let company_override = Self::load_override(&path)?;
                debug!(company_id = %company_id, "Loaded company override");
                overrides.insert(company_id, company_override);
            }
        }

        Ok(overrides)
    }

    /// Checks an override for tables that could not have come from a real company.
    pub fn validate(company_override: &CompanyOverride) -> EngineResult<()> {
        if let Some(admins) = &company_override.pension_administrators {
            let mut seen = HashSet::new();
            for admin in admins {
                if !seen.insert(admin.code.to_ascii_lowercase()) {
                    return Err(invalid(
                        "pension_administrators",
                        format!("duplicate code '{}'", admin.code),
                    ));
                }
                if admin.commission_pct < Decimal::ZERO || admin.disability_pct < Decimal::ZERO {
                    return Err(invalid(
                        "pension_administrators",
                        format!("negative rate for '{}'", admin.code),
                    ));
                }
            }
        }

        if let Some(brackets) = &company_override.family_allowance_brackets {
            let mut sorted: Vec<_> = brackets.iter().collect();
            sorted.sort_by_key(|b| b.upper_threshold);
            for pair in sorted.windows(2) {
                if pair[0].upper_threshold == pair[1].upper_threshold {
                    return Err(invalid(
                        "family_allowance_brackets",
                        format!("duplicate threshold {}", pair[0].upper_threshold),
                    ));
                }
                if pair[0].amount_per_dependent <= pair[1].amount_per_dependent {
                    return Err(invalid(
                        "family_allowance_brackets",
                        format!(
                            "tier '{}' must pay more than tier '{}'",
                            pair[0].tier, pair[1].tier
                        ),
                    ));
                }
            }
            if sorted.iter().any(|b| b.amount_per_dependent < 0) {
                return Err(invalid(
                    "family_allowance_brackets",
                    "negative amount per dependent",
                ));
            }
        }

        if let Some(limits) = &company_override.income_limits {
            if limits.contribution_cap_uf <= Decimal::ZERO {
                return Err(invalid("income_limits", "contribution cap must be positive"));
            }
            if limits.minimum_wage <= 0 {
                return Err(invalid("income_limits", "minimum wage must be positive"));
            }
        }

        Ok(())
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
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FamilyAllowanceBracket, PensionAdministrator};
    use std::path::PathBuf;
    use std::str::FromStr;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("liquidation_engine_{}_{}", name, nanos));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    const ACME_YAML: &str = r#"
pension_administrators:
  - code: habitat
    name: AFP Habitat
    commission_pct: "1.27"
    disability_pct: "1.88"
  - code: modelo
    name: AFP Modelo
    commission_pct: "0.58"
    disability_pct: "1.88"
"#;

    fn admin(code: &str, commission: &str) -> PensionAdministrator {
        PensionAdministrator {
            code: code.to_string(),
            name: code.to_string(),
            commission_pct: dec(commission),
            disability_pct: dec("1.88"),
        }
    }

    #[test]
    fn test_load_valid_override() {
        let dir = temp_dir("load_valid");
        let path = dir.join("acme.yaml");
        fs::write(&path, ACME_YAML).unwrap();

        let company = ConfigLoader::load_override(&path).unwrap();
        let admins = company.pension_administrators.unwrap();
        assert_eq!(admins.len(), 2);
        assert_eq!(admins[1].commission_pct, dec("0.58"));
        assert!(company.income_limits.is_none());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load_override("/nonexistent/acme.yaml");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("acme.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_malformed_file_returns_parse_error() {
        let dir = temp_dir("malformed");
        let path = dir.join("broken.yaml");
        fs::write(&path, "pension_administrators: 42\n").unwrap();

        let result = ConfigLoader::load_override(&path);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_directory_keys_by_file_stem() {
        let dir = temp_dir("directory");
        fs::write(dir.join("acme.yaml"), ACME_YAML).unwrap();
        fs::write(dir.join("globex.yaml"), "{}\n").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let overrides = ConfigLoader::load_directory(&dir).unwrap();
        assert_eq!(overrides.len(), 2);
        assert!(!overrides["acme"].is_empty());
        assert!(overrides["globex"].is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_validate_rejects_duplicate_administrator() {
        let company = CompanyOverride {
            pension_administrators: Some(vec![admin("habitat", "1.27"), admin("HABITAT", "1.10")]),
            ..Default::default()
        };
        match ConfigLoader::validate(&company) {
            Err(EngineError::InvalidConfig { field, message }) => {
                assert_eq!(field, "pension_administrators");
                assert!(message.contains("duplicate"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_decreasing_family_allowance() {
        let company = CompanyOverride {
            family_allowance_brackets: Some(vec![
                FamilyAllowanceBracket {
                    tier: "A".to_string(),
                    upper_threshold: 500_000,
                    amount_per_dependent: 10_000,
                },
                FamilyAllowanceBracket {
                    tier: "B".to_string(),
                    upper_threshold: 800_000,
                    amount_per_dependent: 12_000,
                },
            ]),
            ..Default::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&company),
            Err(EngineError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_defaults_shaped_override() {
        let company = CompanyOverride {
            pension_administrators: Some(crate::config::LegalParameterStore::pension_administrators()),
            family_allowance_brackets: Some(
                crate::config::LegalParameterStore::family_allowance_brackets(),
            ),
            income_limits: Some(crate::config::LegalParameterStore::income_limits()),
        };
        assert!(ConfigLoader::validate(&company).is_ok());
    }
}
