//! Payroll Liquidation Engine for Chilean monthly salaries
//!
//! This crate turns an employee's contract, a pay period and the month's
//! variable income and deductions into an itemized salary settlement
//! (`liquidación de sueldo`): taxable and non-taxable income, pension, health
//! and unemployment deductions, the single second-category income tax,
//! employer-side costs and net pay.
//!
//! Legal tables come from [`config::LegalParameterStore`] and may be replaced
//! per company; live minimum wage, UF and UTM values come from
//! [`indicators::IndicatorProvider`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod indicators;
pub mod live;
pub mod models;
pub mod persistence;
pub mod service;
