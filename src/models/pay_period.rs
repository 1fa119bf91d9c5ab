//! Pay period model.
//!
//! This module contains the [`PayPeriod`] type that defines the month being
//! liquidated and how much of it the employee actually worked.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of days in a commercial payroll month.
pub const COMMERCIAL_MONTH_DAYS: u32 = 30;

/// Represents the monthly period being liquidated.
///
/// # Example
///
/// ```
/// use liquidation_engine::models::PayPeriod;
///
/// let period = PayPeriod {
///     year: 2025,
///     month: 3,
///     days_worked: 30,
///     worked_hours: None,
///     overtime_hours: None,
/// };
///
/// assert!(period.is_full_month());
/// assert_eq!(period.label(), "2025-03");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Days worked in the month (1-31).
    pub days_worked: u32,
    /// Hours actually worked, when tracked.
    #[serde(default)]
    pub worked_hours: Option<Decimal>,
    /// Overtime hours worked, when tracked.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
}

impl PayPeriod {
    /// Returns true when the employee worked at least a full commercial month.
    ///
    /// Months of 31 days still count as full; the salary is never prorated upwards.
    pub fn is_full_month(&self) -> bool {
        self.days_worked >= COMMERCIAL_MONTH_DAYS
    }

    /// Returns the first calendar day of the period, if the year/month are valid.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Returns the `YYYY-MM` label used to key stored liquidations.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Returns the overtime hours, treating an absent value as zero.
    pub fn overtime_hours_or_zero(&self) -> Decimal {
        self.overtime_hours.unwrap_or(Decimal::ZERO)
    }
}
