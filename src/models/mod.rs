//! Core data models for the Payroll Liquidation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod liquidation_result;
mod pay_period;
mod variable;

pub use employee::{ContractType, EmployeeProfile, GratificationMode};
pub use liquidation_result::{
    EmployerCosts, LiquidationResult, LiquidationWarning, NonTaxableIncome,
    PrevisionalDeductions, Severity, TaxableIncome, WarningCode,
};
pub use pay_period::{COMMERCIAL_MONTH_DAYS, PayPeriod};
pub use variable::{VariableDeductions, VariableIncome};
