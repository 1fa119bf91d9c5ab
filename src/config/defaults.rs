//! Legal default parameters.
//!
//! [`LegalParameterStore`] is the read-only source of every table and rate the
//! engine falls back to when a company supplies no override. Values are fixed at
//! compile time; refreshing them from an authority is outside this crate.

use rust_decimal::Decimal;

use crate::indicators::EconomicIndicators;

use super::types::{
    ConfigSource, EffectiveConfiguration, FamilyAllowanceBracket, HealthInstitution,
    HealthInstitutionKind, IncomeLimits, LegalRates, PensionAdministrator, TaxBracket,
};

/// Provides the default legal tables and constants.
///
/// # Example
///
/// ```
/// use liquidation_engine::config::LegalParameterStore;
///
/// let afps = LegalParameterStore::pension_administrators();
/// assert!(afps.iter().any(|a| a.code == "habitat"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalParameterStore;

fn pct(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

fn afp(code: &str, name: &str, commission_pct: Decimal) -> PensionAdministrator {
    PensionAdministrator {
        code: code.to_string(),
        name: name.to_string(),
        commission_pct,
        disability_pct: pct(188, 2),
    }
}

fn health(code: &str, name: &str, kind: HealthInstitutionKind) -> HealthInstitution {
    HealthInstitution {
        code: code.to_string(),
        name: name.to_string(),
        kind,
    }
}

fn tax(from: Decimal, to: Option<Decimal>, rate_pct: Decimal, fixed_units: Decimal) -> TaxBracket {
    TaxBracket {
        from_units: from,
        to_units: to,
        rate_pct,
        fixed_units,
    }
}

impl LegalParameterStore {
    /// Pension administrators with their commissions.
    pub fn pension_administrators() -> Vec<PensionAdministrator> {
        vec![
            afp("capital", "AFP Capital", pct(144, 2)),
            afp("cuprum", "AFP Cuprum", pct(144, 2)),
            afp("habitat", "AFP Habitat", pct(127, 2)),
            afp("modelo", "AFP Modelo", pct(58, 2)),
            afp("planvital", "AFP PlanVital", pct(116, 2)),
            afp("provida", "AFP ProVida", pct(145, 2)),
            afp("uno", "AFP Uno", pct(49, 2)),
        ]
    }

    /// Health institutions.
    pub fn health_institutions() -> Vec<HealthInstitution> {
        use HealthInstitutionKind::{Private, Public};
        vec![
            health("fonasa", "FONASA", Public),
            health("banmedica", "Isapre Banmédica", Private),
            health("colmena", "Isapre Colmena", Private),
            health("consalud", "Isapre Consalud", Private),
            health("cruzblanca", "Isapre Cruz Blanca", Private),
            health("nuevamasvida", "Isapre Nueva Masvida", Private),
            health("vidatres", "Isapre Vida Tres", Private),
        ]
    }

    /// Family-allowance tiers. Incomes at or above the last threshold receive nothing.
    pub fn family_allowance_brackets() -> Vec<FamilyAllowanceBracket> {
        vec![
            FamilyAllowanceBracket {
                tier: "A".to_string(),
                upper_threshold: 539_328,
                amount_per_dependent: 21_243,
            },
            FamilyAllowanceBracket {
                tier: "B".to_string(),
                upper_threshold: 787_746,
                amount_per_dependent: 13_036,
            },
            FamilyAllowanceBracket {
                tier: "C".to_string(),
                upper_threshold: 1_228_614,
                amount_per_dependent: 4_119,
            },
        ]
    }

    /// Monthly single second-category income tax, in UTM.
    pub fn tax_brackets() -> Vec<TaxBracket> {
        vec![
            tax(Decimal::ZERO, Some(pct(135, 1)), Decimal::ZERO, Decimal::ZERO),
            tax(pct(135, 1), Some(Decimal::from(30)), pct(4, 0), Decimal::ZERO),
            tax(Decimal::from(30), Some(Decimal::from(50)), pct(8, 0), pct(66, 2)),
            tax(Decimal::from(50), Some(Decimal::from(70)), pct(135, 1), pct(226, 2)),
            tax(Decimal::from(70), Some(Decimal::from(90)), pct(23, 0), pct(496, 2)),
            tax(Decimal::from(90), Some(Decimal::from(120)), pct(304, 1), pct(956, 2)),
            tax(Decimal::from(120), Some(Decimal::from(310)), pct(35, 0), pct(1868, 2)),
            tax(Decimal::from(310), None, pct(40, 0), pct(8518, 2)),
        ]
    }

    /// Contribution cap, minimum wage and family-allowance ceiling.
    pub fn income_limits() -> IncomeLimits {
        IncomeLimits {
            contribution_cap_uf: pct(843, 1),
            minimum_wage: 529_000,
            family_allowance_ceiling: 1_228_614,
        }
    }

    /// Flat legal rates.
    pub fn rates() -> LegalRates {
        LegalRates {
            pension_base_pct: pct(10, 0),
            health_pct: pct(7, 0),
            disability_pct: pct(188, 2),
            fallback_commission_pct: pct(144, 2),
            unemployment_employee_indefinite_pct: pct(6, 1),
            unemployment_employer_indefinite_pct: pct(24, 1),
            unemployment_employer_fixed_term_pct: pct(30, 1),
            work_injury_pct: pct(93, 2),
            gratification_pct: pct(25, 0),
            gratification_cap_minimum_wages: pct(475, 2),
            max_deduction_pct: pct(45, 0),
            tax_exemption_units: pct(135, 1),
        }
    }

    /// Indicator values used when no live source has answered yet.
    pub fn indicators() -> EconomicIndicators {
        EconomicIndicators::fallback()
    }

    /// The complete default configuration.
    pub fn effective_defaults() -> EffectiveConfiguration {
        EffectiveConfiguration::new(
            ConfigSource::Default,
            Self::pension_administrators(),
            Self::health_institutions(),
            Self::family_allowance_brackets(),
            Self::tax_brackets(),
            Self::income_limits(),
            Self::rates(),
            Self::indicators(),
        )
    }
}
