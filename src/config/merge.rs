//! Combines a company override with the legal defaults.

use tracing::debug;

use super::defaults::LegalParameterStore;
use super::types::{CompanyOverride, ConfigField, ConfigSource, EffectiveConfiguration};

/// Builds the [`EffectiveConfiguration`] for one calculation.
///
/// Each top-level table is taken whole from the company override when the
/// override supplies a non-empty value, and whole from
/// [`LegalParameterStore`] otherwise. Tables are never patched element by
/// element.
///
/// # Example
///
/// ```
/// use liquidation_engine::config::{ConfigurationMerger, LegalParameterStore};
///
/// let config = ConfigurationMerger::merge(None);
/// assert_eq!(config, LegalParameterStore::effective_defaults());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationMerger;

impl ConfigurationMerger {
    /// Merges an optional company override with the legal defaults.
    pub fn merge(company_override: Option<&CompanyOverride>) -> EffectiveConfiguration {
        let mut overridden = Vec::new();

        let pension_administrators = match company_override
            .and_then(|o| o.pension_administrators.as_ref())
            .filter(|table| !table.is_empty())
        {
            Some(table) => {
                overridden.push(ConfigField::PensionAdministrators);
                table.clone()
            }
            None => LegalParameterStore::pension_administrators(),
        };

        let family_allowance_brackets = match company_override
            .and_then(|o| o.family_allowance_brackets.as_ref())
            .filter(|table| !table.is_empty())
        {
            Some(table) => {
                overridden.push(ConfigField::FamilyAllowanceBrackets);
                table.clone()
            }
            None => LegalParameterStore::family_allowance_brackets(),
        };

        let income_limits = match company_override.and_then(|o| o.income_limits.as_ref()) {
            Some(limits) => {
                overridden.push(ConfigField::IncomeLimits);
                limits.clone()
            }
            None => LegalParameterStore::income_limits(),
        };

        let source = if overridden.is_empty() {
            ConfigSource::Default
        } else {
            ConfigSource::CompanyOverride { overridden }
        };
        debug!(source = ?source, "Merged liquidation configuration");

        EffectiveConfiguration::new(
            source,
            pension_administrators,
            LegalParameterStore::health_institutions(),
            family_allowance_brackets,
            LegalParameterStore::tax_brackets(),
            income_limits,
            LegalParameterStore::rates(),
            LegalParameterStore::indicators(),
        )
    }
}
