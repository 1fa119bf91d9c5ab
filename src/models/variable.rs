//! Variable income and deduction inputs.
//!
//! Every field is optional; an absent amount contributes nothing to the
//! liquidation.

use serde::{Deserialize, Serialize};

/// Month-specific income on top of the base salary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableIncome {
    /// Taxable bonuses.
    pub bonuses: Option<i64>,
    /// Taxable sales commissions.
    pub commissions: Option<i64>,
    /// Gratification paid as-is when the employee is not under article 50.
    pub gratification: Option<i64>,
    /// Overtime pay. When absent, it is derived from the period's overtime hours.
    pub overtime_pay: Option<i64>,
    /// Non-taxable meal allowance (`colación`).
    pub meal_allowance: Option<i64>,
    /// Non-taxable transport allowance (`movilización`).
    pub transport_allowance: Option<i64>,
    /// Non-taxable cash-handling allowance (`pérdida de caja`).
    pub cash_allowance: Option<i64>,
}

impl VariableIncome {
    /// Returns every amount with its field name, for boundary validation.
    pub fn named_amounts(&self) -> [(&'static str, Option<i64>); 7] {
        [
            ("bonuses", self.bonuses),
            ("commissions", self.commissions),
            ("gratification", self.gratification),
            ("overtime_pay", self.overtime_pay),
            ("meal_allowance", self.meal_allowance),
            ("transport_allowance", self.transport_allowance),
            ("cash_allowance", self.cash_allowance),
        ]
    }

    /// Sum of the non-taxable allowances, excluding family allowance.
    pub fn allowances_total(&self) -> i64 {
        [
            self.meal_allowance,
            self.transport_allowance,
            self.cash_allowance,
        ]
        .iter()
        .fold(0i64, |total, amount| total.saturating_add(amount.unwrap_or(0)))
    }
}

/// Month-specific deductions that are not previsional or tax.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableDeductions {
    /// Loan repayments (e.g. to a `caja de compensación`).
    pub loans: Option<i64>,
    /// Salary advances already paid during the month.
    pub advances: Option<i64>,
    /// Voluntary pension savings (APV).
    pub voluntary_savings: Option<i64>,
    /// Any other agreed deduction.
    pub other: Option<i64>,
}

impl VariableDeductions {
    /// Returns every amount with its field name, for boundary validation.
    pub fn named_amounts(&self) -> [(&'static str, Option<i64>); 4] {
        [
            ("loans", self.loans),
            ("advances", self.advances),
            ("voluntary_savings", self.voluntary_savings),
            ("other", self.other),
        ]
    }

    /// Sum of all deductions.
    pub fn total(&self) -> i64 {
        self.named_amounts()
            .iter()
            .fold(0i64, |total, (_, amount)| total.saturating_add(amount.unwrap_or(0)))
    }
}
