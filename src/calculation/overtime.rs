//! Overtime pay calculation functionality.
//!
//! Overtime is normally supplied as an amount. When it is not, and the period
//! carries overtime hours, the amount is derived from the contract: the hourly
//! value of the base salary with the legal 50% surcharge.

use rust_decimal::Decimal;

use crate::models::{
    COMMERCIAL_MONTH_DAYS, EmployeeProfile, LiquidationWarning, PayPeriod, VariableIncome,
    WarningCode,
};

use super::rounding::round_pesos;

/// Calendar days in the four-week month used for the hourly value.
pub const OVERTIME_MONTH_DAYS: u32 = 28;

/// Weeks in the month used for the hourly value.
pub const OVERTIME_MONTH_WEEKS: u32 = 4;

/// The overtime surcharge multiplier (50% on top of the hourly value).
pub fn overtime_surcharge() -> Decimal {
    Decimal::new(15, 1)
}

/// The result of resolving a period's overtime pay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OvertimeResult {
    /// Overtime pay in whole pesos.
    pub amount: i64,
    /// Hourly value the overtime was derived from; `None` when an explicit amount was used.
    pub hourly_value: Option<Decimal>,
    /// Informational warning recording a derivation.
    pub warning: Option<LiquidationWarning>,
}

/// Returns the hourly value of a monthly base salary.
///
/// Computed as `base_salary / 30 * 28 / (4 * weekly_hours)`. Returns `None` for a
/// contract with zero weekly hours, or when the value leaves Decimal range.
pub fn hourly_value(base_salary: i64, weekly_hours: Decimal) -> Option<Decimal> {
    let weekly_divisor = Decimal::from(OVERTIME_MONTH_WEEKS).checked_mul(weekly_hours)?;
    let monthly = Decimal::from(base_salary) * Decimal::from(OVERTIME_MONTH_DAYS);
    (monthly / Decimal::from(COMMERCIAL_MONTH_DAYS)).checked_div(weekly_divisor)
}

/// Resolves overtime pay for the period.
///
/// An explicit `income.overtime_pay` always wins. Otherwise, positive overtime
/// hours are paid at `round(hourly_value * 1.5 * overtime_hours)`, saturating
/// at `i64::MAX`.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::calculate_overtime;
/// use liquidation_engine::models::{
///     ContractType, EmployeeProfile, GratificationMode, PayPeriod, VariableIncome,
/// };
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeProfile {
///     id: "emp_001".to_string(),
///     national_id: "12.345.678-5".to_string(),
///     first_name: "Ana".to_string(),
///     last_name: "Rojas".to_string(),
///     base_salary: 900_000,
///     weekly_hours: Decimal::from(45),
///     contract_type: ContractType::Indefinite,
///     pension_administrator: "habitat".to_string(),
///     health_institution: "fonasa".to_string(),
///     family_dependents: 0,
///     gratification_mode: GratificationMode::None,
/// };
/// let period = PayPeriod {
///     year: 2025,
///     month: 3,
///     days_worked: 30,
///     worked_hours: None,
///     overtime_hours: Some(Decimal::from(10)),
/// };
///
/// let result = calculate_overtime(&employee, &period, &VariableIncome::default());
/// // 900_000 / 30 * 28 / 180 = 4_666.67 per hour; * 1.5 * 10 = 70_000
/// assert_eq!(result.amount, 70_000);
/// ```
pub fn calculate_overtime(
    employee: &EmployeeProfile,
    period: &PayPeriod,
    income: &VariableIncome,
) -> OvertimeResult {
    if let Some(amount) = income.overtime_pay {
        return OvertimeResult {
            amount,
            hourly_value: None,
            warning: None,
        };
    }

    let hours = period.overtime_hours_or_zero();
    if hours <= Decimal::ZERO {
        return OvertimeResult {
            amount: 0,
            hourly_value: None,
            warning: None,
        };
    }

    let Some(hourly) = hourly_value(employee.base_salary, employee.weekly_hours) else {
        return OvertimeResult {
            amount: 0,
            hourly_value: None,
            warning: None,
        };
    };

    // Saturates like round_pesos when the product leaves Decimal range
    let amount = hourly
        .checked_mul(overtime_surcharge())
        .and_then(|surcharged| surcharged.checked_mul(hours))
        .map_or(i64::MAX, round_pesos);
    let warning = LiquidationWarning::info(
        WarningCode::OvertimeDerivedFromHours,
        format!(
            "Overtime derived from {} hours at {} per hour plus 50%: {}",
            hours.normalize(),
            hourly.round_dp(2),
            amount
        ),
    );

    OvertimeResult {
        amount,
        hourly_value: Some(hourly),
        warning: Some(warning),
    }
}
