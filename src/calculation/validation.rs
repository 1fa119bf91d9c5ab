//! Boundary validation of liquidation inputs.
//!
//! The calculator assumes well-formed input. Everything a caller can get wrong
//! is checked here first and reported together.

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationErrors};
use crate::models::{EmployeeProfile, PayPeriod, VariableDeductions, VariableIncome};

/// Smallest accepted days worked.
pub const MIN_DAYS_WORKED: u32 = 1;

/// Largest accepted days worked.
pub const MAX_DAYS_WORKED: u32 = 31;

/// Largest accepted monetary input, in pesos.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest accepted hour count for one period (31 days of 24 hours).
pub const MAX_PERIOD_HOURS: u32 = 744;

/// Largest accepted weekly contracted hours.
pub const MAX_WEEKLY_HOURS: u32 = 168;

/// Validates liquidation inputs, collecting every problem found.
///
/// # Returns
///
/// `Ok(())` when the inputs can be liquidated, or every [`ValidationError`]
/// found, in field order:
/// - missing employee, base salary outside `0..=MAX_AMOUNT`, weekly hours
///   outside `(0, MAX_WEEKLY_HOURS]`
/// - month outside 1-12, days worked outside 1-31, hours outside
///   `0..=MAX_PERIOD_HOURS`
/// - any income or deduction amount outside `0..=MAX_AMOUNT`
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::validate_liquidation_input;
/// use liquidation_engine::models::{PayPeriod, VariableDeductions, VariableIncome};
///
/// let period = PayPeriod {
///     year: 2025,
///     month: 13,
///     days_worked: 0,
///     worked_hours: None,
///     overtime_hours: None,
/// };
/// let errors = validate_liquidation_input(
///     None,
///     &period,
///     &VariableIncome::default(),
///     &VariableDeductions::default(),
/// )
/// .unwrap_err();
/// assert_eq!(errors.len(), 3);
/// ```
pub fn validate_liquidation_input(
    employee: Option<&EmployeeProfile>,
    period: &PayPeriod,
    income: &VariableIncome,
    deductions: &VariableDeductions,
) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    match employee {
        None => errors.push(ValidationError::MissingEmployee),
        Some(employee) => {
            check_amount(&mut errors, "base_salary", employee.base_salary);
            if employee.weekly_hours <= Decimal::ZERO {
                errors.push(ValidationError::ZeroWeeklyHours);
            } else if employee.weekly_hours > Decimal::from(MAX_WEEKLY_HOURS) {
                errors.push(ValidationError::WeeklyHoursTooLarge {
                    hours: employee.weekly_hours.to_string(),
                });
            }
        }
    }

    if !(1..=12).contains(&period.month) {
        errors.push(ValidationError::MonthOutOfRange {
            month: period.month,
        });
    }
    if !(MIN_DAYS_WORKED..=MAX_DAYS_WORKED).contains(&period.days_worked) {
        errors.push(ValidationError::DaysWorkedOutOfRange {
            days: period.days_worked,
        });
    }
    for (field, hours) in [
        ("worked_hours", period.worked_hours),
        ("overtime_hours", period.overtime_hours),
    ] {
        match hours {
            Some(h) if h < Decimal::ZERO => errors.push(ValidationError::NegativeHours {
                field: field.to_string(),
                hours: h.to_string(),
            }),
            Some(h) if h > Decimal::from(MAX_PERIOD_HOURS) => {
                errors.push(ValidationError::HoursTooLarge {
                    field: field.to_string(),
                    hours: h.to_string(),
                })
            }
            _ => {}
        }
    }

    let amounts = income
        .named_amounts()
        .into_iter()
        .chain(deductions.named_amounts());
    for (field, amount) in amounts {
        if let Some(amount) = amount {
            check_amount(&mut errors, field, amount);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn check_amount(errors: &mut Vec<ValidationError>, field: &str, amount: i64) {
    if amount < 0 {
        errors.push(ValidationError::NegativeAmount {
            field: field.to_string(),
            amount,
        });
    } else if amount > MAX_AMOUNT {
        errors.push(ValidationError::AmountTooLarge {
            field: field.to_string(),
            amount,
            max: MAX_AMOUNT,
        });
    }
}
