//! The liquidation pipeline.
//!
//! [`calculate_liquidation`] runs every step in its fixed order and assembles
//! the [`LiquidationResult`]. [`liquidate`] puts boundary validation in front of
//! it for callers holding unchecked input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EffectiveConfiguration;
use crate::error::{ValidationError, ValidationErrors};
use crate::models::{
    EmployeeProfile, LiquidationResult, LiquidationWarning, NonTaxableIncome, PayPeriod,
    TaxableIncome, VariableDeductions, VariableIncome, WarningCode,
};

use super::base_salary::prorate_base_salary;
use super::contribution_cap::apply_contribution_cap;
use super::employer_costs::calculate_employer_costs;
use super::family_allowance::calculate_family_allowance;
use super::gratification::calculate_gratification;
use super::income_tax::calculate_income_tax;
use super::overtime::calculate_overtime;
use super::previsional::calculate_previsional;
use super::validation::validate_liquidation_input;

/// Everything needed to liquidate one employee for one period.
///
/// The employee is optional so that a request assembled from a form or a wire
/// payload can be rejected with [`ValidationError::MissingEmployee`]
/// instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquidationRequest {
    /// The employee being liquidated.
    #[serde(default)]
    pub employee: Option<EmployeeProfile>,
    /// The period being liquidated.
    pub period: PayPeriod,
    /// Variable income for the period.
    #[serde(default)]
    pub income: VariableIncome,
    /// Variable deductions for the period.
    #[serde(default)]
    pub deductions: VariableDeductions,
}

/// Validates a request and, when valid, calculates its liquidation.
///
/// # Errors
///
/// Returns every validation failure at once when the request is malformed.
/// Well-formed requests always produce a result; limits and fallbacks surface
/// as warnings on it.
pub fn liquidate(
    request: &LiquidationRequest,
    config: &EffectiveConfiguration,
) -> Result<LiquidationResult, ValidationErrors> {
    validate_liquidation_input(
        request.employee.as_ref(),
        &request.period,
        &request.income,
        &request.deductions,
    )?;

    let Some(employee) = request.employee.as_ref() else {
        return Err(ValidationErrors(vec![ValidationError::MissingEmployee]));
    };

    Ok(calculate_liquidation(
        employee,
        &request.period,
        &request.income,
        &request.deductions,
        config,
    ))
}

/// Calculates the monthly liquidation for an employee.
///
/// This is a pure function: it reads only its arguments, keeps no state between
/// calls and can run concurrently for independent inputs. Input is assumed to
/// have passed [`validate_liquidation_input`].
///
/// # Pipeline
///
/// 1. Prorate the base salary over days worked
/// 2. Taxable subtotal: prorated base, overtime, bonuses and commissions
/// 3. Gratification: article 50 with its cap, or the raw value
/// 4. Total taxable income (uncapped)
/// 5. Contribution-base cap
/// 6. Family allowance from the prorated base
/// 7. Non-taxable income
/// 8. Previsional deductions on the capped base
/// 9. Income tax on the capped base
/// 10. Employer costs on the capped base
/// 11. Other deductions
/// 12. Totals
/// 13. Deduction-ceiling check
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::calculate_liquidation;
/// use liquidation_engine::config::LegalParameterStore;
/// use liquidation_engine::models::{
///     ContractType, EmployeeProfile, GratificationMode, PayPeriod, VariableDeductions,
///     VariableIncome,
/// };
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
/// let period = PayPeriod {
///     year: 2025,
///     month: 3,
///     days_worked: 30,
///     worked_hours: None,
///     overtime_hours: None,
/// };
///
/// let result = calculate_liquidation(
///     &employee,
///     &period,
///     &VariableIncome::default(),
///     &VariableDeductions::default(),
///     &LegalParameterStore::effective_defaults(),
/// );
///
/// assert_eq!(result.gross_total, 1_000_000);
/// assert_eq!(result.net_pay, result.gross_total - result.total_deductions);
/// ```
pub fn calculate_liquidation(
    employee: &EmployeeProfile,
    period: &PayPeriod,
    income: &VariableIncome,
    deductions: &VariableDeductions,
    config: &EffectiveConfiguration,
) -> LiquidationResult {
    let rates = config.rates();
    let limits = config.income_limits();
    let mut warnings: Vec<LiquidationWarning> = Vec::new();

    // Steps 1-2
    let base_salary = prorate_base_salary(employee.base_salary, period);
    let overtime = calculate_overtime(employee, period, income);
    warnings.extend(overtime.warning);
    let bonuses = income.bonuses.unwrap_or(0);
    let commissions = income.commissions.unwrap_or(0);
    let taxable_subtotal = base_salary
        .saturating_add(overtime.amount)
        .saturating_add(bonuses)
        .saturating_add(commissions);
    debug!(
        employee_id = %employee.id,
        base_salary,
        taxable_subtotal,
        "Taxable subtotal assembled"
    );

    // Steps 3-4
    let gratification = calculate_gratification(
        employee.gratification_mode,
        taxable_subtotal,
        income.gratification,
        limits.minimum_wage,
        rates,
    );
    warnings.extend(gratification.warning.clone());
    let taxable_income = TaxableIncome {
        base_salary,
        overtime: overtime.amount,
        bonuses,
        commissions,
        gratification: gratification.raw,
        legal_gratification: gratification.legal,
        total: taxable_subtotal.saturating_add(gratification.amount()),
    };

    // Step 5
    let cap = apply_contribution_cap(taxable_income.total, config.contribution_cap());
    warnings.extend(cap.warning);
    let contribution_base = cap.contribution_base;
    debug!(
        total_taxable = taxable_income.total,
        contribution_base,
        cap_applied = cap.cap_applied,
        "Contribution base resolved"
    );

    // Steps 6-7
    let family_allowance = calculate_family_allowance(
        base_salary,
        employee.family_dependents,
        config.family_allowance_brackets(),
        limits.family_allowance_ceiling,
    );
    warnings.extend(family_allowance.warning);
    let non_taxable_income = NonTaxableIncome {
        meal_allowance: income.meal_allowance.unwrap_or(0),
        transport_allowance: income.transport_allowance.unwrap_or(0),
        cash_allowance: income.cash_allowance.unwrap_or(0),
        family_allowance: family_allowance.amount,
        total: income
            .allowances_total()
            .saturating_add(family_allowance.amount),
    };

    // Step 8
    let previsional = calculate_previsional(contribution_base, employee, config);
    warnings.extend(previsional.warnings);

    // Step 9
    let income_tax = calculate_income_tax(
        contribution_base,
        config.tax_brackets(),
        config.indicators().utm_value,
        rates.tax_exemption_units,
    );
    warnings.push(income_tax.warning);

    // Step 10
    let employer_costs = calculate_employer_costs(
        contribution_base,
        employee.contract_type,
        previsional.disability_pct,
        rates,
    );

    // Steps 11-12
    let other_deductions = deductions.total();
    let gross_total = taxable_income.total.saturating_add(non_taxable_income.total);
    let total_deductions = previsional
        .deductions
        .total
        .saturating_add(income_tax.amount)
        .saturating_add(other_deductions);
    let net_pay = gross_total.saturating_sub(total_deductions);

    // Step 13
    if exceeds_deduction_ceiling(total_deductions, gross_total, rates.max_deduction_pct) {
        warnings.push(LiquidationWarning::warning(
            WarningCode::DeductionCeilingExceeded,
            format!(
                "Deductions {} exceed {}% of gross pay {}",
                total_deductions,
                rates.max_deduction_pct.normalize(),
                gross_total
            ),
        ));
    }

    info!(
        employee_id = %employee.id,
        period = %period.label(),
        gross = gross_total,
        deductions = total_deductions,
        net = net_pay,
        warnings = warnings.len(),
        "Liquidation calculated"
    );

    LiquidationResult {
        employee_id: employee.id.clone(),
        period: period.clone(),
        taxable_income,
        non_taxable_income,
        contribution_base,
        previsional: previsional.deductions,
        income_tax: income_tax.amount,
        other_deductions,
        employer_costs,
        gross_total,
        total_deductions,
        net_pay,
        cap_exceeded: cap.cap_applied,
        warnings,
    }
}

/// Returns true when deductions take more than `max_pct` percent of gross pay.
///
/// Any positive deduction against zero gross pay exceeds the ceiling.
pub fn exceeds_deduction_ceiling(total_deductions: i64, gross_total: i64, max_pct: Decimal) -> bool {
    if gross_total <= 0 {
        return total_deductions > 0;
    }
    Decimal::from(total_deductions) * Decimal::ONE_HUNDRED > Decimal::from(gross_total) * max_pct
}
