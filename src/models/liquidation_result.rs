//! Liquidation result models.
//!
//! This module contains the [`LiquidationResult`] type and its itemized
//! sections: taxable and non-taxable income, previsional deductions, employer
//! costs, totals, and the advisory warnings raised along the way.

use serde::{Deserialize, Serialize};

use super::PayPeriod;

/// How much attention a warning needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Traceability only; the calculation took a normal path.
    Info,
    /// A limit or fallback changed the outcome and should be reviewed.
    Warning,
}

/// Identifies the rule that produced a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// Taxable income exceeded the contribution-base cap.
    ContributionCapApplied,
    /// Legal gratification was limited to 4.75 minimum wages per year.
    GratificationCapApplied,
    /// Legal gratification stayed below its cap.
    GratificationWithinCap,
    /// Family allowance tier matched for the employee's salary.
    FamilyAllowanceTier,
    /// Income-tax bracket matched for the contribution base.
    IncomeTaxBracket,
    /// Deductions exceed the legal share of gross pay.
    DeductionCeilingExceeded,
    /// Pension administrator code missing from the table; fallback commission used.
    UnknownPensionAdministrator,
    /// Health institution code missing from the table.
    UnknownHealthInstitution,
    /// Overtime pay was derived from overtime hours and the contract.
    OvertimeDerivedFromHours,
}

/// A non-fatal observation returned alongside a liquidation.
///
/// # Example
///
/// ```
/// use liquidation_engine::models::{LiquidationWarning, Severity, WarningCode};
///
/// let warning = LiquidationWarning::new(
///     WarningCode::ContributionCapApplied,
///     Severity::Warning,
///     "Taxable income capped at 84.3 UF",
/// );
/// assert_eq!(warning.code, WarningCode::ContributionCapApplied);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationWarning {
    /// The rule that raised the warning.
    pub code: WarningCode,
    /// How much attention the warning needs.
    pub severity: Severity,
    /// A human-readable description.
    pub message: String,
}

impl LiquidationWarning {
    /// Creates a new warning.
    pub fn new(code: WarningCode, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
        }
    }

    /// Creates an informational warning.
    pub fn info(code: WarningCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, message)
    }

    /// Creates a warning that should be reviewed.
    pub fn warning(code: WarningCode, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message)
    }
}

/// Income subject to contributions and income tax (`haberes imponibles`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxableIncome {
    /// Base salary prorated by days worked.
    pub base_salary: i64,
    /// Overtime pay.
    pub overtime: i64,
    /// Bonuses.
    pub bonuses: i64,
    /// Commissions.
    pub commissions: i64,
    /// Raw gratification paid outside article 50.
    pub gratification: i64,
    /// Article 50 legal gratification.
    pub legal_gratification: i64,
    /// Sum of all taxable components, before the contribution-base cap.
    pub total: i64,
}

/// Income exempt from contributions and tax (`haberes no imponibles`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonTaxableIncome {
    /// Meal allowance.
    pub meal_allowance: i64,
    /// Transport allowance.
    pub transport_allowance: i64,
    /// Cash-handling allowance.
    pub cash_allowance: i64,
    /// Family allowance (`asignación familiar`).
    pub family_allowance: i64,
    /// Sum of all non-taxable components.
    pub total: i64,
}

/// Mandatory social-security deductions from the employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrevisionalDeductions {
    /// Mandatory 10% pension contribution.
    pub pension_base: i64,
    /// Pension administrator commission.
    pub pension_commission: i64,
    /// Mandatory 7% health contribution.
    pub health: i64,
    /// Employee share of unemployment insurance.
    pub unemployment: i64,
    /// Sum of all previsional deductions.
    pub total: i64,
}

/// Costs borne by the employer. Informational only; never deducted from net pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCosts {
    /// Disability and survivorship insurance (SIS).
    pub disability_insurance: i64,
    /// Employer share of unemployment insurance.
    pub unemployment: i64,
    /// Work-injury insurance (mutual).
    pub work_injury: i64,
    /// Sum of all employer costs.
    pub total: i64,
}

/// The complete itemized monthly settlement for one employee.
///
/// A result is a pure value: the same inputs always produce an identical result,
/// so it carries no identifiers or timestamps of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidationResult {
    /// The ID of the employee the liquidation is for.
    pub employee_id: String,
    /// The period liquidated.
    pub period: PayPeriod,
    /// Taxable income breakdown.
    pub taxable_income: TaxableIncome,
    /// Non-taxable income breakdown.
    pub non_taxable_income: NonTaxableIncome,
    /// Taxable income after the contribution-base cap; base for deductions and tax.
    pub contribution_base: i64,
    /// Previsional deductions.
    pub previsional: PrevisionalDeductions,
    /// Single second-category income tax.
    pub income_tax: i64,
    /// Loans, advances, voluntary savings and other deductions.
    pub other_deductions: i64,
    /// Employer-side costs.
    pub employer_costs: EmployerCosts,
    /// Taxable (uncapped) plus non-taxable income.
    pub gross_total: i64,
    /// Previsional deductions plus income tax plus other deductions.
    pub total_deductions: i64,
    /// Gross total minus total deductions.
    pub net_pay: i64,
    /// True when the contribution-base cap reduced the contribution base.
    pub cap_exceeded: bool,
    /// Advisory warnings in the order they were raised.
    pub warnings: Vec<LiquidationWarning>,
}

impl LiquidationResult {
    /// Returns true if a warning with the given code was raised.
    pub fn has_warning(&self, code: WarningCode) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }

    /// Returns the total cost of the employee to the company.
    pub fn total_employer_cost(&self) -> i64 {
        self.gross_total + self.employer_costs.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_sample_result() -> LiquidationResult {
        LiquidationResult {
            employee_id: "emp_001".to_string(),
            period: PayPeriod {
                year: 2025,
                month: 3,
                days_worked: 30,
                worked_hours: None,
                overtime_hours: None,
            },
            taxable_income: TaxableIncome {
                base_salary: 1_000_000,
                total: 1_000_000,
                ..Default::default()
            },
            non_taxable_income: NonTaxableIncome::default(),
            contribution_base: 1_000_000,
            previsional: PrevisionalDeductions {
                pension_base: 100_000,
                pension_commission: 12_700,
                health: 70_000,
                unemployment: 6_000,
                total: 188_700,
            },
            income_tax: 13_000,
            other_deductions: 0,
            employer_costs: EmployerCosts {
                disability_insurance: 18_800,
                unemployment: 24_000,
                work_injury: 9_300,
                total: 52_100,
            },
            gross_total: 1_000_000,
            total_deductions: 201_700,
            net_pay: 798_300,
            cap_exceeded: false,
            warnings: vec![LiquidationWarning::info(
                WarningCode::IncomeTaxBracket,
                "Bracket 13.5-30 UTM at 4%",
            )],
        }
    }

    #[test]
    fn test_warning_code_serialization() {
        assert_eq!(
            serde_json::to_string(&WarningCode::ContributionCapApplied).unwrap(),
            "\"contribution_cap_applied\""
        );
        assert_eq!(
            serde_json::to_string(&WarningCode::DeductionCeilingExceeded).unwrap(),
            "\"deduction_ceiling_exceeded\""
        );
    }

    #[test]
    fn test_warning_serialization() {
        let warning =
            LiquidationWarning::warning(WarningCode::GratificationCapApplied, "Capped");
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"gratification_cap_applied\""));
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"message\":\"Capped\""));
    }

    #[test]
    fn test_result_serialization_uses_integer_amounts() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        assert!(json.contains("\"gross_total\":1000000"));
        assert!(json.contains("\"net_pay\":798300"));
        assert!(json.contains("\"cap_exceeded\":false"));
        assert!(json.contains("\"previsional\":{"));
        assert!(json.contains("\"employer_costs\":{"));
    }

    #[test]
    fn test_result_deserialization() {
        let json = serde_json::to_string(&create_sample_result()).unwrap();
        let result: LiquidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, create_sample_result());
    }

    #[test]
    fn test_has_warning() {
        let result = create_sample_result();
        assert!(result.has_warning(WarningCode::IncomeTaxBracket));
        assert!(!result.has_warning(WarningCode::ContributionCapApplied));
    }

    #[test]
    fn test_total_employer_cost_adds_employer_side() {
        let result = create_sample_result();
        assert_eq!(result.total_employer_cost(), 1_052_100);
    }
}
