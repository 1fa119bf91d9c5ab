//! Family allowance calculation functionality.
//!
//! The allowance is paid per dependent by income tier. The tier is chosen from
//! the proportional base salary, not from total taxable income.

use tracing::debug;

use crate::config::FamilyAllowanceBracket;
use crate::models::{LiquidationWarning, WarningCode};

/// The result of the family allowance step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyAllowanceResult {
    /// The matched tier label; `None` above the top threshold or without dependents.
    pub tier: Option<String>,
    /// Amount per dependent in the matched tier.
    pub amount_per_dependent: i64,
    /// Total allowance in pesos.
    pub amount: i64,
    /// Records the tier used, when dependents exist.
    pub warning: Option<LiquidationWarning>,
}

impl FamilyAllowanceResult {
    fn zero(warning: Option<LiquidationWarning>) -> Self {
        Self {
            tier: None,
            amount_per_dependent: 0,
            amount: 0,
            warning,
        }
    }
}

/// Finds the tier for an income.
///
/// Brackets must be sorted by `upper_threshold`. Each tier covers
/// `[previous_threshold, upper_threshold)`, the first starting at zero. Incomes at
/// or above the last threshold match nothing.
pub fn find_family_allowance_bracket(
    brackets: &[FamilyAllowanceBracket],
    income: i64,
) -> Option<&FamilyAllowanceBracket> {
    let mut lower = 0;
    for bracket in brackets {
        if income >= lower && income < bracket.upper_threshold {
            return Some(bracket);
        }
        lower = bracket.upper_threshold;
    }
    None
}

/// Calculates the family allowance.
///
/// # Arguments
///
/// * `proportional_base` - Base salary prorated by days worked
/// * `dependents` - Number of dependents
/// * `brackets` - Tier table, sorted by threshold
/// * `ceiling` - Income at or above which no allowance is paid
///
/// # Examples
///
/// ```
/// use liquidation_engine::calculation::calculate_family_allowance;
/// use liquidation_engine::config::LegalParameterStore;
///
/// let brackets = LegalParameterStore::family_allowance_brackets();
/// let result = calculate_family_allowance(500_000, 2, &brackets, 1_228_614);
/// assert_eq!(result.tier.as_deref(), Some("A"));
/// assert_eq!(result.amount, 42_486);
/// ```
pub fn calculate_family_allowance(
    proportional_base: i64,
    dependents: u32,
    brackets: &[FamilyAllowanceBracket],
    ceiling: i64,
) -> FamilyAllowanceResult {
    if dependents == 0 {
        return FamilyAllowanceResult::zero(None);
    }

    let matched = if proportional_base >= ceiling {
        None
    } else {
        find_family_allowance_bracket(brackets, proportional_base)
    };

    let Some(bracket) = matched else {
        debug!(
            income = proportional_base,
            dependents, "Income above family allowance tiers"
        );
        return FamilyAllowanceResult::zero(Some(LiquidationWarning::info(
            WarningCode::FamilyAllowanceTier,
            format!(
                "Income {} is above the family allowance tiers; no allowance for {} dependent(s)",
                proportional_base, dependents
            ),
        )));
    };

    let amount = bracket
        .amount_per_dependent
        .saturating_mul(i64::from(dependents));
    debug!(tier = %bracket.tier, dependents, amount, "Family allowance tier matched");

    FamilyAllowanceResult {
        tier: Some(bracket.tier.clone()),
        amount_per_dependent: bracket.amount_per_dependent,
        amount,
        warning: Some(LiquidationWarning::info(
            WarningCode::FamilyAllowanceTier,
            format!(
                "Family allowance tier {}: {} dependent(s) x {}",
                bracket.tier, dependents, bracket.amount_per_dependent
            ),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LegalParameterStore;

    fn brackets() -> Vec<FamilyAllowanceBracket> {
        LegalParameterStore::family_allowance_brackets()
    }

    const CEILING: i64 = 1_228_614;

    /// FA-001: zero dependents pays nothing regardless of salary
    #[test]
    fn test_zero_dependents_pays_nothing() {
        let result = calculate_family_allowance(300_000, 0, &brackets(), CEILING);
        assert_eq!(result.amount, 0);
        assert!(result.tier.is_none());
        assert!(result.warning.is_none());
    }

    /// FA-002: lowest tier
    #[test]
    fn test_tier_a() {
        let result = calculate_family_allowance(500_000, 2, &brackets(), CEILING);
        assert_eq!(result.tier.as_deref(), Some("A"));
        assert_eq!(result.amount_per_dependent, 21_243);
        assert_eq!(result.amount, 42_486);
        assert_eq!(result.warning.unwrap().code, WarningCode::FamilyAllowanceTier);
    }

    /// FA-003: thresholds are exclusive upper bounds
    #[test]
    fn test_threshold_belongs_to_next_tier() {
        let at_a = calculate_family_allowance(539_328, 1, &brackets(), CEILING);
        assert_eq!(at_a.tier.as_deref(), Some("B"));
        assert_eq!(at_a.amount, 13_036);

        let below_a = calculate_family_allowance(539_327, 1, &brackets(), CEILING);
        assert_eq!(below_a.tier.as_deref(), Some("A"));
    }

    /// FA-004: tier C
    #[test]
    fn test_tier_c() {
        let result = calculate_family_allowance(1_000_000, 3, &brackets(), CEILING);
        assert_eq!(result.tier.as_deref(), Some("C"));
        assert_eq!(result.amount, 12_357);
    }

    /// FA-005: at or above the top threshold pays zero
    #[test]
    fn test_above_top_threshold_pays_zero() {
        let result = calculate_family_allowance(1_228_614, 2, &brackets(), CEILING);
        assert_eq!(result.amount, 0);
        assert!(result.tier.is_none());
        assert!(result.warning.is_some());
    }

    /// FA-006: a lower company ceiling cuts off earlier tiers
    #[test]
    fn test_ceiling_below_top_threshold() {
        let result = calculate_family_allowance(800_000, 1, &brackets(), 700_000);
        assert_eq!(result.amount, 0);
    }

    #[test]
    fn test_find_bracket_with_empty_table() {
        assert!(find_family_allowance_bracket(&[], 100_000).is_none());
    }

    #[test]
    fn test_zero_income_is_tier_a() {
        let table = brackets();
        let bracket = find_family_allowance_bracket(&table, 0).unwrap();
        assert_eq!(bracket.tier, "A");
    }
}
