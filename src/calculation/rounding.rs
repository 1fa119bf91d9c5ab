//! Whole-peso rounding and percentage helpers.
//!
//! Pesos have no fractional unit. Every computed amount is rounded to the
//! nearest peso with ties going away from zero.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal amount to whole pesos, ties away from zero.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::round_pesos;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_pesos(Decimal::from_str("2.5").unwrap()), 3);
/// assert_eq!(round_pesos(Decimal::from_str("2.4999").unwrap()), 2);
/// assert_eq!(round_pesos(Decimal::from_str("-2.5").unwrap()), -3);
/// ```
pub fn round_pesos(amount: Decimal) -> i64 {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    // Saturate on amounts beyond i64; no real salary gets there
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Returns `pct` percent of `amount`, unrounded.
pub fn percent_of(amount: Decimal, pct: Decimal) -> Decimal {
    amount * pct / Decimal::ONE_HUNDRED
}

/// Returns `pct` percent of a whole-peso amount, rounded to whole pesos.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::percent_of_pesos;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(percent_of_pesos(1_000_000, Decimal::from_str("0.6").unwrap()), 6_000);
/// ```
pub fn percent_of_pesos(amount: i64, pct: Decimal) -> i64 {
    round_pesos(percent_of(Decimal::from(amount), pct))
}
