//! Employee profile and contract-related types.
//!
//! This module defines the [`EmployeeProfile`] struct together with the
//! [`ContractType`] and [`GratificationMode`] enums that steer the liquidation
//! pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of employment contract.
///
/// The contract type determines the unemployment-insurance split between
/// employee and employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Open-ended contract (`plazo indefinido`).
    Indefinite,
    /// Fixed-term contract (`plazo fijo`).
    FixedTerm,
    /// Contract for a specific project or task (`por obra o faena`).
    Project,
}

impl ContractType {
    /// Returns true if the contract is open-ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use liquidation_engine::models::ContractType;
    ///
    /// assert!(ContractType::Indefinite.is_indefinite());
    /// assert!(!ContractType::Project.is_indefinite());
    /// ```
    pub fn is_indefinite(self) -> bool {
        self == ContractType::Indefinite
    }
}

/// How the legal gratification is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GratificationMode {
    /// Monthly 25% gratification capped at 4.75 minimum wages per year.
    #[serde(rename = "article_50")]
    Article50,
    /// No legal gratification; any raw gratification input is paid as-is.
    None,
}

/// Represents an employee whose salary is being liquidated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Unique identifier for the employee.
    pub id: String,
    /// National identification number (RUT).
    pub national_id: String,
    /// Given name(s).
    pub first_name: String,
    /// Family name(s).
    pub last_name: String,
    /// Monthly base salary in whole pesos.
    pub base_salary: i64,
    /// Weekly contracted hours.
    pub weekly_hours: Decimal,
    /// The contract type.
    pub contract_type: ContractType,
    /// Pension administrator (AFP) code, e.g. `"habitat"`.
    pub pension_administrator: String,
    /// Health institution code, e.g. `"fonasa"`.
    pub health_institution: String,
    /// Number of dependents entitled to family allowance.
    #[serde(default)]
    pub family_dependents: u32,
    /// How the legal gratification is paid.
    pub gratification_mode: GratificationMode,
}

impl EmployeeProfile {
    /// Returns the employee's full name.
    ///
    /// # Examples
    ///
    /// ```
    /// use liquidation_engine::models::{ContractType, EmployeeProfile, GratificationMode};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = EmployeeProfile {
    ///     id: "emp_001".to_string(),
    ///     national_id: "12.345.678-5".to_string(),
    ///     first_name: "Camila".to_string(),
    ///     last_name: "Rojas".to_string(),
    ///     base_salary: 850_000,
    ///     weekly_hours: Decimal::from(44),
    ///     contract_type: ContractType::Indefinite,
    ///     pension_administrator: "habitat".to_string(),
    ///     health_institution: "fonasa".to_string(),
    ///     family_dependents: 0,
    ///     gratification_mode: GratificationMode::Article50,
    /// };
    /// assert_eq!(employee.full_name(), "Camila Rojas");
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
