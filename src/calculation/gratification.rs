//! Gratification calculation functionality.
//!
//! Under article 50 of the Labour Code the employer pays 25% of the month's
//! taxable income, capped at 4.75 minimum wages per year (one twelfth per month).
//! Employees outside article 50 receive whatever raw gratification was entered.

use rust_decimal::Decimal;

use crate::config::LegalRates;
use crate::models::{GratificationMode, LiquidationWarning, WarningCode};

use super::rounding::{percent_of_pesos, round_pesos};

/// Months the yearly gratification cap is spread over.
pub const MONTHS_PER_YEAR: u32 = 12;

/// The result of the gratification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GratificationResult {
    /// Raw gratification paid outside article 50.
    pub raw: i64,
    /// Article 50 legal gratification.
    pub legal: i64,
    /// Monthly cap in pesos; `None` outside article 50.
    pub cap: Option<i64>,
    /// True when the cap limited the legal gratification.
    pub cap_applied: bool,
    /// Records whether the cap was hit. Present only under article 50.
    pub warning: Option<LiquidationWarning>,
}

impl GratificationResult {
    /// The gratification component that joins taxable income.
    pub fn amount(&self) -> i64 {
        self.raw.saturating_add(self.legal)
    }
}

/// Returns the monthly article 50 cap, `round(minimum_wage * 4.75 / 12)`.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::monthly_gratification_cap;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let cap = monthly_gratification_cap(529_000, Decimal::from_str("4.75").unwrap());
/// assert_eq!(cap, 209_396);
/// ```
pub fn monthly_gratification_cap(minimum_wage: i64, cap_minimum_wages: Decimal) -> i64 {
    round_pesos(Decimal::from(minimum_wage) * cap_minimum_wages / Decimal::from(MONTHS_PER_YEAR))
}

/// Calculates the gratification component of taxable income.
///
/// # Arguments
///
/// * `mode` - The employee's gratification mode
/// * `taxable_subtotal` - Proportional base plus overtime, bonuses and commissions
/// * `raw_gratification` - Gratification entered for the month, used outside article 50
/// * `minimum_wage` - The minimum wage in force
/// * `rates` - Legal rates carrying the 25% share and the 4.75 cap multiple
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::calculate_gratification;
/// use liquidation_engine::config::LegalParameterStore;
/// use liquidation_engine::models::GratificationMode;
///
/// let rates = LegalParameterStore::rates();
/// let result = calculate_gratification(
///     GratificationMode::Article50,
///     2_000_000,
///     None,
///     529_000,
///     &rates,
/// );
/// assert_eq!(result.legal, 209_396);
/// assert!(result.cap_applied);
/// ```
pub fn calculate_gratification(
    mode: GratificationMode,
    taxable_subtotal: i64,
    raw_gratification: Option<i64>,
    minimum_wage: i64,
    rates: &LegalRates,
) -> GratificationResult {
    match mode {
        GratificationMode::None => GratificationResult {
            raw: raw_gratification.unwrap_or(0),
            legal: 0,
            cap: None,
            cap_applied: false,
            warning: None,
        },
        GratificationMode::Article50 => {
            let uncapped = percent_of_pesos(taxable_subtotal, rates.gratification_pct);
            let cap = monthly_gratification_cap(minimum_wage, rates.gratification_cap_minimum_wages);
            let cap_applied = uncapped > cap;
            let legal = uncapped.min(cap);

            let warning = if cap_applied {
                LiquidationWarning::warning(
                    WarningCode::GratificationCapApplied,
                    format!(
                        "Legal gratification {} capped at {} ({} minimum wages per year)",
                        uncapped,
                        cap,
                        rates.gratification_cap_minimum_wages.normalize()
                    ),
                )
            } else {
                LiquidationWarning::info(
                    WarningCode::GratificationWithinCap,
                    format!("Legal gratification {} within cap {}", legal, cap),
                )
            };

            GratificationResult {
                raw: 0,
                legal,
                cap: Some(cap),
                cap_applied,
                warning: Some(warning),
            }
        }
    }
}
