//! Configuration for the Payroll Liquidation Engine.
//!
//! This module holds the legal default tables, the company override model,
//! the merge that turns both into an [`EffectiveConfiguration`], and the
//! collaborators that load and store company overrides.
//!
//! # Example
//!
//! ```
//! use liquidation_engine::config::{CompanyOverride, ConfigurationMerger, ConfigSource};
//!
//! let config = ConfigurationMerger::merge(Some(&CompanyOverride::default()));
//! assert_eq!(config.source(), &ConfigSource::Default);
//! ```

mod defaults;
mod loader;
mod merge;
mod settings;
mod types;

pub use defaults::LegalParameterStore;
pub use loader::ConfigLoader;
pub use merge::ConfigurationMerger;
pub use settings::{InMemorySettingsStore, SettingsStore};
pub use types::{
    CompanyOverride, ConfigField, ConfigSource, EffectiveConfiguration, FamilyAllowanceBracket,
    HealthInstitution, HealthInstitutionKind, IncomeLimits, LegalRates, PensionAdministrator,
    TaxBracket,
};
