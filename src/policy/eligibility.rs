//! Eligibility pre-check.
//!
//! Independent of the simulation engine: it looks only at declared income
//! and the requested amount, never at rates or schedules.

use crate::core::format::format_currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an applicant did not pass the pre-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IneligibilityReason {
    InsufficientIncome {
        monthly_income: Decimal,
        minimum: Decimal,
    },
    AmountExceedsIncomeMultiple {
        requested: Decimal,
        maximum: Decimal,
    },
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibilityReason::InsufficientIncome {
                monthly_income,
                minimum,
            } => write!(
                f,
                "monthly income {} is below the required {}",
                format_currency(*monthly_income),
                format_currency(*minimum)
            ),
            IneligibilityReason::AmountExceedsIncomeMultiple { requested, maximum } => write!(
                f,
                "requested amount {} exceeds the maximum of {} for this income",
                format_currency(*requested),
                format_currency(*maximum)
            ),
        }
    }
}

/// Outcome of [`EligibilityPolicy::check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum EligibilityDecision {
    Eligible,
    Ineligible(IneligibilityReason),
}

impl EligibilityDecision {
    pub fn is_eligible(&self) -> bool {
        matches!(self, EligibilityDecision::Eligible)
    }

    pub fn reason(&self) -> Option<&IneligibilityReason> {
        match self {
            EligibilityDecision::Eligible => None,
            EligibilityDecision::Ineligible(reason) => Some(reason),
        }
    }
}

impl fmt::Display for EligibilityDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityDecision::Eligible => f.write_str("eligible"),
            EligibilityDecision::Ineligible(reason) => write!(f, "not eligible: {}", reason),
        }
    }
}

/// Income rules for the pre-check.
///
/// # Examples
///
/// ```
/// use loan_simulator::policy::eligibility::EligibilityPolicy;
/// use rust_decimal_macros::dec;
///
/// let policy = EligibilityPolicy::default();
/// assert!(policy.check(dec!(200000), dec!(2000000)).is_eligible());
/// assert!(!policy.check(dec!(100000), dec!(50000)).is_eligible());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPolicy {
    pub min_monthly_income: Decimal,
    /// Requested amount may be at most this many times the monthly income.
    pub max_income_multiple: Decimal,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            min_monthly_income: dec!(150_000),
            max_income_multiple: dec!(10),
        }
    }
}

impl EligibilityPolicy {
    /// Largest amount an applicant with `monthly_income` may request.
    pub fn max_amount(&self, monthly_income: Decimal) -> Decimal {
        monthly_income * self.max_income_multiple
    }

    /// Apply the income rules in order; the first failing rule decides.
    pub fn check(&self, monthly_income: Decimal, requested_amount: Decimal) -> EligibilityDecision {
        if monthly_income < self.min_monthly_income {
            return EligibilityDecision::Ineligible(IneligibilityReason::InsufficientIncome {
                monthly_income,
                minimum: self.min_monthly_income,
            });
        }

        let maximum = self.max_amount(monthly_income);
        if requested_amount > maximum {
            return EligibilityDecision::Ineligible(
                IneligibilityReason::AmountExceedsIncomeMultiple {
                    requested: requested_amount,
                    maximum,
                },
            );
        }

        EligibilityDecision::Eligible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_income() {
        let policy = EligibilityPolicy::default();
        let decision = policy.check(dec!(149_999), dec!(10_000));
        assert_eq!(
            decision,
            EligibilityDecision::Ineligible(IneligibilityReason::InsufficientIncome {
                monthly_income: dec!(149_999),
                minimum: dec!(150_000),
            })
        );
    }

    #[test]
    fn test_income_rule_checked_first() {
        let policy = EligibilityPolicy::default();
        let decision = policy.check(dec!(50_000), dec!(2_500_000));
        assert!(matches!(
            decision.reason(),
            Some(IneligibilityReason::InsufficientIncome { .. })
        ));
    }

    #[test]
    fn test_amount_exceeds_multiple() {
        let policy = EligibilityPolicy::default();
        let decision = policy.check(dec!(200_000), dec!(2_000_001));
        assert_eq!(
            decision,
            EligibilityDecision::Ineligible(IneligibilityReason::AmountExceedsIncomeMultiple {
                requested: dec!(2_000_001),
                maximum: dec!(2_000_000),
            })
        );
    }

    #[test]
    fn test_boundaries_are_eligible() {
        let policy = EligibilityPolicy::default();
        assert!(policy.check(dec!(150_000), dec!(1_500_000)).is_eligible());
    }

    #[test]
    fn test_reason_display() {
        let policy = EligibilityPolicy::default();
        let decision = policy.check(dec!(100_000), dec!(10_000));
        assert_eq!(
            decision.to_string(),
            "not eligible: monthly income $\u{a0}100.000 is below the required $\u{a0}150.000"
        );
    }

    #[test]
    fn test_decision_json_shape() {
        let json = serde_json::to_value(EligibilityDecision::Eligible).unwrap();
        assert_eq!(json["decision"], "eligible");

        let policy = EligibilityPolicy::default();
        let json = serde_json::to_value(policy.check(dec!(160_000), dec!(2_000_000))).unwrap();
        assert_eq!(json["decision"], "ineligible");
        assert_eq!(json["reason"]["kind"], "amount_exceeds_income_multiple");
    }
}
