//! Previsional (social-security) deductions.
//!
//! Pension, administrator commission, health and the employee share of
//! unemployment insurance, all computed on the capped contribution base.

use rust_decimal::Decimal;
use tracing::warn;

use crate::config::EffectiveConfiguration;
use crate::models::{EmployeeProfile, LiquidationWarning, PrevisionalDeductions, WarningCode};

use super::rounding::percent_of_pesos;

/// The result of the previsional deductions step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrevisionalResult {
    /// Itemized deductions.
    pub deductions: PrevisionalDeductions,
    /// Commission rate applied, in percent.
    pub commission_pct: Decimal,
    /// Employer disability rate for the employee's administrator, in percent.
    pub disability_pct: Decimal,
    /// Warnings for codes missing from the configuration tables.
    pub warnings: Vec<LiquidationWarning>,
}

/// Calculates the employee's previsional deductions.
///
/// An administrator code missing from the table does not fail: the fallback
/// commission from the legal rates is used and a warning is recorded. An
/// unknown health institution is also only warned about; the legal 7% base
/// applies regardless of the institution.
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::calculate_previsional;
/// use liquidation_engine::config::LegalParameterStore;
/// use liquidation_engine::models::{ContractType, EmployeeProfile, GratificationMode};
/// use rust_decimal::Decimal;
///
/// let employee = EmployeeProfile {
///     id: "emp_001".to_string(),
///     national_id: "12.345.678-5".to_string(),
///     first_name: "Ana".to_string(),
///     last_name: "Rojas".to_string(),
///     base_salary: 1_000_000,
///     weekly_hours: Decimal::from(44),
///     contract_type: ContractType::Indefinite,
///     pension_administrator: "habitat".to_string(),
///     health_institution: "fonasa".to_string(),
///     family_dependents: 0,
///     gratification_mode: GratificationMode::None,
/// };
///
/// let config = LegalParameterStore::effective_defaults();
/// let result = calculate_previsional(1_000_000, &employee, &config);
/// assert_eq!(result.deductions.pension_base, 100_000);
/// assert_eq!(result.deductions.pension_commission, 12_700);
/// assert_eq!(result.deductions.health, 70_000);
/// assert_eq!(result.deductions.unemployment, 6_000);
/// ```
pub fn calculate_previsional(
    contribution_base: i64,
    employee: &EmployeeProfile,
    config: &EffectiveConfiguration,
) -> PrevisionalResult {
    let rates = config.rates();
    let mut warnings = Vec::new();

    let (commission_pct, disability_pct) =
        match config.pension_administrator(&employee.pension_administrator) {
            Some(admin) => (admin.commission_pct, admin.disability_pct),
            None => {
                warn!(
                    employee_id = %employee.id,
                    code = %employee.pension_administrator,
                    "Unknown pension administrator, using fallback commission"
                );
                warnings.push(LiquidationWarning::warning(
                    WarningCode::UnknownPensionAdministrator,
                    format!(
                        "Pension administrator '{}' not found; fallback commission {}% applied",
                        employee.pension_administrator,
                        rates.fallback_commission_pct.normalize()
                    ),
                ));
                (rates.fallback_commission_pct, rates.disability_pct)
            }
        };

    if config.health_institution(&employee.health_institution).is_none() {
        warn!(
            employee_id = %employee.id,
            code = %employee.health_institution,
            "Unknown health institution"
        );
        warnings.push(LiquidationWarning::warning(
            WarningCode::UnknownHealthInstitution,
            format!(
                "Health institution '{}' not found; legal {}% applied",
                employee.health_institution,
                rates.health_pct.normalize()
            ),
        ));
    }

    let pension_base = percent_of_pesos(contribution_base, rates.pension_base_pct);
    let pension_commission = percent_of_pesos(contribution_base, commission_pct);
    let health = percent_of_pesos(contribution_base, rates.health_pct);
    let unemployment = percent_of_pesos(
        contribution_base,
        rates.unemployment_employee_pct(employee.contract_type),
    );

    PrevisionalResult {
        deductions: PrevisionalDeductions {
            pension_base,
            pension_commission,
            health,
            unemployment,
            total: pension_base
                .saturating_add(pension_commission)
                .saturating_add(health)
                .saturating_add(unemployment),
        },
        commission_pct,
        disability_pct,
        warnings,
    }
}
