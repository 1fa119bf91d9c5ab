//! Configuration types for liquidation.
//!
//! This module contains the strongly-typed legal tables and the
//! [`EffectiveConfiguration`] a single liquidation runs against. Tables are
//! deserialized from YAML company override files and built from the legal
//! defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::contribution_cap_pesos;
use crate::indicators::EconomicIndicators;
use crate::models::ContractType;

/// A pension fund administrator (AFP).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionAdministrator {
    /// Lookup code (e.g. `"habitat"`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Administrator commission, in percent of the contribution base.
    pub commission_pct: Decimal,
    /// Disability and survivorship insurance (SIS), in percent. Paid by the employer.
    pub disability_pct: Decimal,
}

/// Whether a health institution is the public fund or a private insurer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthInstitutionKind {
    /// FONASA.
    Public,
    /// An ISAPRE.
    Private,
}

/// A health institution the 7% contribution is paid to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthInstitution {
    /// Lookup code (e.g. `"fonasa"`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Public fund or private insurer.
    pub kind: HealthInstitutionKind,
}

/// One family-allowance income tier.
///
/// A tier covers incomes from the previous tier's threshold (or zero) up to,
/// but excluding, its own `upper_threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyAllowanceBracket {
    /// Tier label (`"A"`, `"B"`, `"C"`).
    pub tier: String,
    /// Exclusive upper income bound, in pesos.
    pub upper_threshold: i64,
    /// Amount paid per dependent, in pesos.
    pub amount_per_dependent: i64,
}

/// One bracket of the monthly single second-category income tax.
///
/// Bounds are expressed in monthly tax units (UTM). The bracket covers
/// `[from_units, to_units)`; the last bracket has no upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Inclusive lower bound in UTM.
    pub from_units: Decimal,
    /// Exclusive upper bound in UTM; `None` for the top bracket.
    pub to_units: Option<Decimal>,
    /// Marginal rate, in percent.
    pub rate_pct: Decimal,
    /// Tax accumulated by all lower brackets, in UTM.
    pub fixed_units: Decimal,
}

impl TaxBracket {
    /// Returns true if `units` falls in `[from_units, to_units)`.
    pub fn contains(&self, units: Decimal) -> bool {
        units >= self.from_units && self.to_units.is_none_or(|to| units < to)
    }

    /// Returns the cumulative fixed amount of this bracket in pesos.
    pub fn fixed_amount(&self, utm_value: Decimal) -> Decimal {
        self.fixed_units * utm_value
    }

    /// Returns a short label such as `"13.5-30 UTM at 4%"`.
    pub fn label(&self) -> String {
        match self.to_units {
            Some(to) => format!(
                "{}-{} UTM at {}%",
                self.from_units.normalize(),
                to.normalize(),
                self.rate_pct.normalize()
            ),
            None => format!(
                "over {} UTM at {}%",
                self.from_units.normalize(),
                self.rate_pct.normalize()
            ),
        }
    }
}

/// Income limits that cap or gate amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeLimits {
    /// Contribution-base cap, in UF.
    pub contribution_cap_uf: Decimal,
    /// Monthly minimum wage, in pesos.
    pub minimum_wage: i64,
    /// Income at or above which no family allowance is paid, in pesos.
    pub family_allowance_ceiling: i64,
}

/// Flat legal percentages. These are not company-overridable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalRates {
    /// Mandatory pension contribution, in percent.
    pub pension_base_pct: Decimal,
    /// Mandatory health contribution, in percent.
    pub health_pct: Decimal,
    /// Employer disability insurance used when the administrator carries none, in percent.
    pub disability_pct: Decimal,
    /// Commission used for administrator codes missing from the table, in percent.
    pub fallback_commission_pct: Decimal,
    /// Employee unemployment insurance for indefinite contracts, in percent.
    pub unemployment_employee_indefinite_pct: Decimal,
    /// Employer unemployment insurance for indefinite contracts, in percent.
    pub unemployment_employer_indefinite_pct: Decimal,
    /// Employer unemployment insurance for fixed-term and project contracts, in percent.
    pub unemployment_employer_fixed_term_pct: Decimal,
    /// Basic work-injury insurance, in percent.
    pub work_injury_pct: Decimal,
    /// Legal gratification share of taxable income, in percent.
    pub gratification_pct: Decimal,
    /// Yearly gratification cap, in minimum wages.
    pub gratification_cap_minimum_wages: Decimal,
    /// Maximum share of gross pay deductions may take, in percent.
    pub max_deduction_pct: Decimal,
    /// Income below this many UTM pays no income tax.
    pub tax_exemption_units: Decimal,
}

impl LegalRates {
    /// Employee unemployment-insurance rate for a contract type, in percent.
    pub fn unemployment_employee_pct(&self, contract_type: ContractType) -> Decimal {
        match contract_type {
            ContractType::Indefinite => self.unemployment_employee_indefinite_pct,
            ContractType::FixedTerm | ContractType::Project => Decimal::ZERO,
        }
    }

    /// Employer unemployment-insurance rate for a contract type, in percent.
    pub fn unemployment_employer_pct(&self, contract_type: ContractType) -> Decimal {
        match contract_type {
            ContractType::Indefinite => self.unemployment_employer_indefinite_pct,
            ContractType::FixedTerm | ContractType::Project => {
                self.unemployment_employer_fixed_term_pct
            }
        }
    }
}

/// A company-specific override of the legal tables.
///
/// Each field replaces the corresponding default table in full. A table that
/// is absent or empty leaves the default in force; there is no element-wise
/// merge, so overriding one administrator means supplying the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyOverride {
    /// Complete replacement pension administrator table.
    pub pension_administrators: Option<Vec<PensionAdministrator>>,
    /// Complete replacement family-allowance bracket table.
    pub family_allowance_brackets: Option<Vec<FamilyAllowanceBracket>>,
    /// Complete replacement income limits.
    ///
    /// The minimum wage given here takes precedence over the live indicator feed.
    pub income_limits: Option<IncomeLimits>,
}

impl CompanyOverride {
    /// Returns true when no field would replace a default.
    pub fn is_empty(&self) -> bool {
        self.pension_administrators.as_ref().is_none_or(Vec::is_empty)
            && self
                .family_allowance_brackets
                .as_ref()
                .is_none_or(Vec::is_empty)
            && self.income_limits.is_none()
    }
}

/// A top-level configuration field that a company can replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigField {
    /// The pension administrator table.
    PensionAdministrators,
    /// The family-allowance bracket table.
    FamilyAllowanceBrackets,
    /// The income limits.
    IncomeLimits,
}

/// Where an [`EffectiveConfiguration`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigSource {
    /// Every table is the legal default.
    Default,
    /// At least one table was replaced by the company.
    CompanyOverride {
        /// The fields taken from the company override.
        overridden: Vec<ConfigField>,
    },
}

/// The complete configuration one liquidation runs against.
///
/// Built by [`ConfigurationMerger`](super::ConfigurationMerger) and never
/// mutated afterwards; live indicator values are applied by consuming the
/// value through [`EffectiveConfiguration::with_indicators`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfiguration {
    source: ConfigSource,
    pension_administrators: Vec<PensionAdministrator>,
    health_institutions: Vec<HealthInstitution>,
    family_allowance_brackets: Vec<FamilyAllowanceBracket>,
    tax_brackets: Vec<TaxBracket>,
    income_limits: IncomeLimits,
    rates: LegalRates,
    indicators: EconomicIndicators,
}

impl EffectiveConfiguration {
    /// Creates a new EffectiveConfiguration from its component parts.
    ///
    /// Family-allowance brackets and tax brackets are sorted by their lower bound.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: ConfigSource,
        pension_administrators: Vec<PensionAdministrator>,
        health_institutions: Vec<HealthInstitution>,
        family_allowance_brackets: Vec<FamilyAllowanceBracket>,
        tax_brackets: Vec<TaxBracket>,
        income_limits: IncomeLimits,
        rates: LegalRates,
        indicators: EconomicIndicators,
    ) -> Self {
        let mut family_allowance_brackets = family_allowance_brackets;
        family_allowance_brackets.sort_by_key(|b| b.upper_threshold);
        let mut tax_brackets = tax_brackets;
        tax_brackets.sort_by(|a, b| a.from_units.cmp(&b.from_units));
        Self {
            source,
            pension_administrators,
            health_institutions,
            family_allowance_brackets,
            tax_brackets,
            income_limits,
            rates,
            indicators,
        }
    }

    /// Applies live economic indicators.
    ///
    /// The live minimum wage replaces `income_limits.minimum_wage` unless the
    /// company overrode its income limits, in which case the company's value
    /// stays in force.
    pub fn with_indicators(mut self, indicators: EconomicIndicators) -> Self {
        if !self.overrides(ConfigField::IncomeLimits) {
            self.income_limits.minimum_wage = indicators.minimum_wage;
        }
        self.indicators = indicators;
        self
    }

    /// Returns true when `field` was taken from a company override.
    pub fn overrides(&self, field: ConfigField) -> bool {
        match &self.source {
            ConfigSource::Default => false,
            ConfigSource::CompanyOverride { overridden } => overridden.contains(&field),
        }
    }

    /// Returns where this configuration came from.
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Returns the pension administrator table.
    pub fn pension_administrators(&self) -> &[PensionAdministrator] {
        &self.pension_administrators
    }

    /// Looks up a pension administrator by code, ignoring case.
    pub fn pension_administrator(&self, code: &str) -> Option<&PensionAdministrator> {
        self.pension_administrators
            .iter()
            .find(|a| a.code.eq_ignore_ascii_case(code))
    }

    /// Returns the health institution table.
    pub fn health_institutions(&self) -> &[HealthInstitution] {
        &self.health_institutions
    }

    /// Looks up a health institution by code, ignoring case.
    pub fn health_institution(&self, code: &str) -> Option<&HealthInstitution> {
        self.health_institutions
            .iter()
            .find(|h| h.code.eq_ignore_ascii_case(code))
    }

    /// Returns the family-allowance brackets, lowest tier first.
    pub fn family_allowance_brackets(&self) -> &[FamilyAllowanceBracket] {
        &self.family_allowance_brackets
    }

    /// Returns the income-tax brackets, lowest first.
    pub fn tax_brackets(&self) -> &[TaxBracket] {
        &self.tax_brackets
    }

    /// Returns the income limits.
    pub fn income_limits(&self) -> &IncomeLimits {
        &self.income_limits
    }

    /// Returns the flat legal rates.
    pub fn rates(&self) -> &LegalRates {
        &self.rates
    }

    /// Returns the economic indicators in force.
    pub fn indicators(&self) -> &EconomicIndicators {
        &self.indicators
    }

    /// Returns the contribution-base cap in pesos.
    pub fn contribution_cap(&self) -> i64 {
        contribution_cap_pesos(self.income_limits.contribution_cap_uf, self.indicators.uf_value)
    }
}
