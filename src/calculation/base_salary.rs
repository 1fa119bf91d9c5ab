//! Base salary proration by days worked.

use rust_decimal::Decimal;

use crate::models::{COMMERCIAL_MONTH_DAYS, PayPeriod};

use super::rounding::round_pesos;

/// Prorates a monthly base salary over a 30-day commercial month.
///
/// A period of 30 or more days pays the full salary. Shorter periods pay
/// `round(base_salary / 30 * days_worked)`; the multiplication is done first so
/// the division introduces no intermediate rounding.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::prorate_base_salary;
/// use liquidation_engine::models::PayPeriod;
///
/// let period = PayPeriod {
///     year: 2025,
///     month: 2,
///     days_worked: 15,
///     worked_hours: None,
///     overtime_hours: None,
/// };
/// assert_eq!(prorate_base_salary(1_000_000, &period), 500_000);
/// ```
pub fn prorate_base_salary(base_salary: i64, period: &PayPeriod) -> i64 {
    if period.is_full_month() {
        return base_salary;
    }

    let prorated = Decimal::from(base_salary) * Decimal::from(period.days_worked)
        / Decimal::from(COMMERCIAL_MONTH_DAYS);
    round_pesos(prorated)
}
