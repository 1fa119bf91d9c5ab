//! Employer-side contributions.
//!
//! These are reported for cost accounting only and never reduce net pay.

use rust_decimal::Decimal;

use crate::config::LegalRates;
use crate::models::{ContractType, EmployerCosts};

use super::rounding::percent_of_pesos;

/// Calculates the employer's contributions on the capped contribution base.
///
/// # Arguments
///
/// * `contribution_base` - Taxable income after the contribution-base cap
/// * `contract_type` - Selects the employer unemployment-insurance rate
/// * `disability_pct` - SIS rate of the employee's pension administrator
/// * `rates` - Legal rates carrying the unemployment and work-injury percentages
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::calculate_employer_costs;
/// use liquidation_engine::config::LegalParameterStore;
/// use liquidation_engine::models::ContractType;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let costs = calculate_employer_costs(
///     1_000_000,
///     ContractType::Indefinite,
///     Decimal::from_str("1.88").unwrap(),
///     &LegalParameterStore::rates(),
/// );
/// assert_eq!(costs.disability_insurance, 18_800);
/// assert_eq!(costs.unemployment, 24_000);
/// assert_eq!(costs.work_injury, 9_300);
/// assert_eq!(costs.total, 52_100);
/// ```
pub fn calculate_employer_costs(
    contribution_base: i64,
    contract_type: ContractType,
    disability_pct: Decimal,
    rates: &LegalRates,
) -> EmployerCosts {
    let disability_insurance = percent_of_pesos(contribution_base, disability_pct);
    let unemployment = percent_of_pesos(
        contribution_base,
        rates.unemployment_employer_pct(contract_type),
    );
    let work_injury = percent_of_pesos(contribution_base, rates.work_injury_pct);

    EmployerCosts {
        disability_insurance,
        unemployment,
        work_injury,
        total: disability_insurance
            .saturating_add(unemployment)
            .saturating_add(work_injury),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LegalParameterStore;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// EC-001: indefinite contract employer share is 2.4%
    #[test]
    fn test_indefinite_contract() {
        let costs = calculate_employer_costs(
            1_000_000,
            ContractType::Indefinite,
            dec("1.88"),
            &LegalParameterStore::rates(),
        );
        assert_eq!(costs.unemployment, 24_000);
        assert_eq!(costs.total, 52_100);
    }

    /// EC-002: fixed-term and project contracts pay 3% employer unemployment
    #[test]
    fn test_fixed_term_contract() {
        for contract_type in [ContractType::FixedTerm, ContractType::Project] {
            let costs = calculate_employer_costs(
                1_000_000,
                contract_type,
                dec("1.88"),
                &LegalParameterStore::rates(),
            );
            assert_eq!(costs.unemployment, 30_000);
            assert_eq!(costs.total, 58_100);
        }
    }

    #[test]
    fn test_disability_rate_from_administrator() {
        let costs = calculate_employer_costs(
            2_000_000,
            ContractType::Indefinite,
            dec("1.50"),
            &LegalParameterStore::rates(),
        );
        assert_eq!(costs.disability_insurance, 30_000);
    }

    #[test]
    fn test_rounding() {
        // 333_333 * 0.93% = 3_099.9969
        let costs = calculate_employer_costs(
            333_333,
            ContractType::Indefinite,
            dec("1.88"),
            &LegalParameterStore::rates(),
        );
        assert_eq!(costs.work_injury, 3_100);
        // 333_333 * 1.88% = 6_266.6604
        assert_eq!(costs.disability_insurance, 6_267);
        // 333_333 * 2.4% = 7_999.992
        assert_eq!(costs.unemployment, 8_000);
    }
}
