//! Single second-category income tax (`impuesto único`).
//!
//! The capped contribution base is expressed in UTM and looked up in the
//! progressive bracket table. Each bracket carries the cumulative tax of the
//! brackets below it, so only the marginal part is computed here.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::TaxBracket;
use crate::models::{LiquidationWarning, WarningCode};

use super::rounding::{percent_of, round_pesos};

/// The result of the income tax step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeTaxResult {
    /// Income tax in whole pesos.
    pub amount: i64,
    /// The taxed income in UTM.
    pub income_units: Decimal,
    /// The matched bracket, if any.
    pub bracket: Option<TaxBracket>,
    /// Records the bracket used.
    pub warning: LiquidationWarning,
}

/// Calculates the income tax on the capped contribution base.
///
/// Incomes below `exemption_units` pay nothing. Otherwise the bracket with
/// `from_units <= income_units < to_units` is used and the tax is
/// `fixed_amount + (income - from_units * utm) * rate`, rounded to whole pesos.
/// A bracket with a zero rate always yields zero.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::calculate_income_tax;
/// use liquidation_engine::config::LegalParameterStore;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let brackets = LegalParameterStore::tax_brackets();
/// let utm = Decimal::from(69_265);
/// let exemption = Decimal::from_str("13.5").unwrap();
///
/// let result = calculate_income_tax(1_000_000, &brackets, utm, exemption);
/// // (1_000_000 - 13.5 * 69_265) * 4% = 2_596.9
/// assert_eq!(result.amount, 2_597);
/// ```
pub fn calculate_income_tax(
    contribution_base: i64,
    brackets: &[TaxBracket],
    utm_value: Decimal,
    exemption_units: Decimal,
) -> IncomeTaxResult {
    let income = Decimal::from(contribution_base);
    let Some(income_units) = income.checked_div(utm_value) else {
        return IncomeTaxResult {
            amount: 0,
            income_units: Decimal::ZERO,
            bracket: None,
            warning: LiquidationWarning::warning(
                WarningCode::IncomeTaxBracket,
                "UTM value is zero; income tax not computed",
            ),
        };
    };

    if income_units < exemption_units {
        debug!(units = %income_units.round_dp(4), "Income below tax exemption");
        return IncomeTaxResult {
            amount: 0,
            income_units,
            bracket: brackets.iter().find(|b| b.contains(income_units)).cloned(),
            warning: LiquidationWarning::info(
                WarningCode::IncomeTaxBracket,
                format!(
                    "Income {} UTM is below the {} UTM exemption",
                    income_units.round_dp(2),
                    exemption_units.normalize()
                ),
            ),
        };
    }

    let Some(bracket) = brackets.iter().find(|b| b.contains(income_units)) else {
        return IncomeTaxResult {
            amount: 0,
            income_units,
            bracket: None,
            warning: LiquidationWarning::warning(
                WarningCode::IncomeTaxBracket,
                format!(
                    "No income tax bracket covers {} UTM",
                    income_units.round_dp(2)
                ),
            ),
        };
    };

    let amount = if bracket.rate_pct.is_zero() {
        0
    } else {
        let marginal = income - bracket.from_units * utm_value;
        round_pesos(bracket.fixed_amount(utm_value) + percent_of(marginal, bracket.rate_pct))
    };

    debug!(
        units = %income_units.round_dp(4),
        bracket = %bracket.label(),
        amount,
        "Income tax bracket matched"
    );

    IncomeTaxResult {
        amount,
        income_units,
        bracket: Some(bracket.clone()),
        warning: LiquidationWarning::info(
            WarningCode::IncomeTaxBracket,
            format!(
                "Income {} UTM taxed in bracket {}",
                income_units.round_dp(2),
                bracket.label()
            ),
        ),
    }
}
