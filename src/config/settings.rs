//! Per-company settings storage.
//!
//! The [`SettingsStore`] trait is the seam to wherever company overrides are
//! kept. [`InMemorySettingsStore`] backs tests and single-process deployments.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::EngineResult;

use super::loader::ConfigLoader;
use super::types::CompanyOverride;

/// Stores company overrides keyed by company id.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the stored override, or `None` when the company uses the defaults.
    async fn get(&self, company_id: &str) -> EngineResult<Option<CompanyOverride>>;

    /// Applies a partial update.
    ///
    /// Every field present in `patch` replaces the stored field in full; absent
    /// fields keep their stored value. Returns the resulting override.
    async fn update(&self, company_id: &str, patch: CompanyOverride) -> EngineResult<CompanyOverride>;

    /// Atomically replaces the whole stored override, as a refresh from an
    /// authoritative source does.
    async fn replace(&self, company_id: &str, company_override: CompanyOverride) -> EngineResult<()>;
}

/// A [`SettingsStore`] held in process memory.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    overrides: RwLock<HashMap<String, CompanyOverride>>,
}

impl InMemorySettingsStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with overrides, e.g. from [`ConfigLoader::load_directory`].
    pub fn with_overrides(overrides: HashMap<String, CompanyOverride>) -> Self {
        Self {
            overrides: RwLock::new(overrides),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, company_id: &str) -> EngineResult<Option<CompanyOverride>> {
        Ok(self.overrides.read().await.get(company_id).cloned())
    }

    async fn update(&self, company_id: &str, patch: CompanyOverride) -> EngineResult<CompanyOverride> {
        ConfigLoader::validate(&patch)?;

        let mut overrides = self.overrides.write().await;
        let stored = overrides.entry(company_id.to_string()).or_default();
        if patch.pension_administrators.is_some() {
            stored.pension_administrators = patch.pension_administrators;
        }
        if patch.family_allowance_brackets.is_some() {
            stored.family_allowance_brackets = patch.family_allowance_brackets;
        }
        if patch.income_limits.is_some() {
            stored.income_limits = patch.income_limits;
        }
        info!(company_id = %company_id, "Updated company settings");
        Ok(stored.clone())
    }

    async fn replace(&self, company_id: &str, company_override: CompanyOverride) -> EngineResult<()> {
        ConfigLoader::validate(&company_override)?;

        self.overrides
            .write()
            .await
            .insert(company_id.to_string(), company_override);
        info!(company_id = %company_id, "Replaced company settings");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IncomeLimits, LegalParameterStore, PensionAdministrator};
    use crate::error::EngineError;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn admins(commission: &str) -> Vec<PensionAdministrator> {
        vec![PensionAdministrator {
            code: "habitat".to_string(),
            name: "AFP Habitat".to_string(),
            commission_pct: dec(commission),
            disability_pct: dec("1.88"),
        }]
    }

    fn limits(cap: &str) -> IncomeLimits {
        IncomeLimits {
            contribution_cap_uf: dec(cap),
            ..LegalParameterStore::income_limits()
        }
    }

    #[tokio::test]
    async fn test_unknown_company_uses_defaults() {
        let store = InMemorySettingsStore::new();
        assert!(store.get("acme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_only_supplied_fields() {
        let store = InMemorySettingsStore::new();
        store
            .update(
                "acme",
                CompanyOverride {
                    pension_administrators: Some(admins("1.27")),
                    income_limits: Some(limits("84.3")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let updated = store
            .update(
                "acme",
                CompanyOverride {
                    income_limits: Some(limits("90")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.pension_administrators, Some(admins("1.27")));
        assert_eq!(updated.income_limits, Some(limits("90")));
        assert_eq!(store.get("acme").await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_replace_discards_previous_fields() {
        let store = InMemorySettingsStore::new();
        store
            .update(
                "acme",
                CompanyOverride {
                    pension_administrators: Some(admins("1.27")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let refreshed = CompanyOverride {
            income_limits: Some(limits("85")),
            ..Default::default()
        };
        store.replace("acme", refreshed.clone()).await.unwrap();

        assert_eq!(store.get("acme").await.unwrap(), Some(refreshed));
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_patch() {
        let store = InMemorySettingsStore::new();
        let result = store
            .update(
                "acme",
                CompanyOverride {
                    income_limits: Some(limits("0")),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
        assert!(store.get("acme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_companies_are_isolated() {
        let store = InMemorySettingsStore::new();
        store
            .replace(
                "acme",
                CompanyOverride {
                    pension_administrators: Some(admins("1.27")),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(store.get("globex").await.unwrap().is_none());
    }
}
