//! Calculation logic for the Payroll Liquidation Engine.
//!
//! Each step of the liquidation pipeline lives in its own module: base salary
//! proration, overtime, gratification, the contribution-base cap, family
//! allowance, previsional deductions, income tax and employer costs.
//! [`calculate_liquidation`] runs them in order; [`liquidate`] validates first.

mod base_salary;
mod contribution_cap;
mod employer_costs;
mod family_allowance;
mod gratification;
mod income_tax;
mod liquidation;
mod overtime;
mod previsional;
mod rounding;
mod validation;

pub use base_salary::prorate_base_salary;
pub use contribution_cap::{
    ContributionCapResult, apply_contribution_cap, contribution_cap_pesos,
};
pub use employer_costs::calculate_employer_costs;
pub use family_allowance::{
    FamilyAllowanceResult, calculate_family_allowance, find_family_allowance_bracket,
};
pub use gratification::{
    GratificationResult, MONTHS_PER_YEAR, calculate_gratification, monthly_gratification_cap,
};
pub use income_tax::{IncomeTaxResult, calculate_income_tax};
pub use liquidation::{
    LiquidationRequest, calculate_liquidation, exceeds_deduction_ceiling, liquidate,
};
pub use overtime::{
    OVERTIME_MONTH_DAYS, OVERTIME_MONTH_WEEKS, OvertimeResult, calculate_overtime, hourly_value,
    overtime_surcharge,
};
pub use previsional::{PrevisionalResult, calculate_previsional};
pub use rounding::{percent_of, percent_of_pesos, round_pesos};
pub use validation::{
    MAX_AMOUNT, MAX_DAYS_WORKED, MAX_PERIOD_HOURS, MAX_WEEKLY_HOURS, MIN_DAYS_WORKED,
    validate_liquidation_input,
};
