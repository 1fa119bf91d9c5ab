//! Contribution-base cap (`tope imponible`).
//!
//! Pension, health and unemployment contributions and the income tax are
//! computed on taxable income limited to a number of UF. The reported taxable
//! and gross totals are never reduced by the cap.

use rust_decimal::Decimal;

use crate::models::{LiquidationWarning, WarningCode};

use super::rounding::round_pesos;

/// The result of applying the contribution-base cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionCapResult {
    /// Taxable income after the cap; the base for deductions, tax and employer costs.
    pub contribution_base: i64,
    /// The cap in whole pesos.
    pub cap: i64,
    /// True when taxable income exceeded the cap.
    pub cap_applied: bool,
    /// Present when the cap was applied.
    pub warning: Option<LiquidationWarning>,
}

/// Returns the contribution-base cap in whole pesos: `cap_uf * uf_value`,
/// rounded, saturating at `i64::MAX`.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::contribution_cap_pesos;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let cap_uf = Decimal::from_str("84.3").unwrap();
/// let uf = Decimal::from_str("39485.65").unwrap();
/// // 3_328_640.295
/// assert_eq!(contribution_cap_pesos(cap_uf, uf), 3_328_640);
/// ```
pub fn contribution_cap_pesos(cap_uf: Decimal, uf_value: Decimal) -> i64 {
    cap_uf.checked_mul(uf_value).map_or(i64::MAX, round_pesos)
}

/// Applies the contribution-base cap to total taxable income.
///
/// Taxable income strictly above `cap` is replaced by `cap`.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::apply_contribution_cap;
///
/// let result = apply_contribution_cap(5_000_000, 3_328_640);
/// assert!(result.cap_applied);
/// assert_eq!(result.contribution_base, 3_328_640);
/// ```
pub fn apply_contribution_cap(total_taxable: i64, cap: i64) -> ContributionCapResult {

    if total_taxable <= cap {
        return ContributionCapResult {
            contribution_base: total_taxable,
            cap,
            cap_applied: false,
            warning: None,
        };
    }

    let warning = LiquidationWarning::warning(
        WarningCode::ContributionCapApplied,
        format!(
            "Taxable income {} exceeds the contribution cap; contributions and tax computed on {}",
            total_taxable, cap
        ),
    );

    ContributionCapResult {
        contribution_base: cap,
        cap,
        cap_applied: true,
        warning: Some(warning),
    }
}
