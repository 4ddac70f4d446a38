//! Tiered annual-rate policy with a rate floor.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A single step of a tier table: inputs at or above `threshold`
/// receive `adjustment` percentage points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier<T> {
    pub threshold: T,
    pub adjustment: Decimal,
}

impl<T> Tier<T> {
    pub fn new(threshold: T, adjustment: Decimal) -> Self {
        Self {
            threshold,
            adjustment,
        }
    }
}

/// The highest-threshold tier that `value` reaches, if any.
///
/// Only one tier ever applies; list order is irrelevant.
fn highest_tier<'a, T: PartialOrd>(tiers: &'a [Tier<T>], value: &T) -> Option<&'a Tier<T>> {
    tiers
        .iter()
        .filter(|tier| tier.threshold <= *value)
        .fold(None, |best: Option<&'a Tier<T>>, tier| match best {
            Some(current) if current.threshold >= tier.threshold => Some(current),
            _ => Some(tier),
        })
}

/// Annual interest-rate policy.
///
/// The rate starts at `base_rate`, loses the discount of the single highest
/// amount tier the principal reaches, gains the surcharge of the single
/// highest term tier the term reaches, and never drops below `floor_rate`.
/// All rates are annual nominal percentages (`84` means 84%).
///
/// # Examples
///
/// ```
/// use loan_simulator::engine::rate::RatePolicy;
/// use rust_decimal_macros::dec;
///
/// let policy = RatePolicy::default();
/// // 85 - 2 (amount >= 100 000) + 1 (term >= 12)
/// assert_eq!(policy.rate(dec!(100000), 12), dec!(84));
/// // Tiers never stack: only the -12 tier applies
/// assert_eq!(policy.rate(dec!(1500000), 6), dec!(73));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatePolicy {
    pub base_rate: Decimal,
    pub floor_rate: Decimal,
    /// Subtracted from the base rate.
    pub amount_discounts: Vec<Tier<Decimal>>,
    /// Added to the base rate.
    pub term_surcharges: Vec<Tier<u32>>,
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self {
            base_rate: dec!(85),
            floor_rate: dec!(30),
            amount_discounts: vec![
                Tier::new(dec!(1_000_000), dec!(12)),
                Tier::new(dec!(500_000), dec!(8)),
                Tier::new(dec!(250_000), dec!(5)),
                Tier::new(dec!(100_000), dec!(2)),
            ],
            term_surcharges: vec![
                Tier::new(48, dec!(6)),
                Tier::new(36, dec!(4)),
                Tier::new(24, dec!(2)),
                Tier::new(12, dec!(1)),
            ],
        }
    }
}

impl RatePolicy {
    /// Discount earned by the principal, zero below every tier.
    pub fn amount_discount(&self, amount: Decimal) -> Decimal {
        highest_tier(&self.amount_discounts, &amount)
            .map(|tier| tier.adjustment)
            .unwrap_or(Decimal::ZERO)
    }

    /// Surcharge for the term length, zero below every tier.
    pub fn term_surcharge(&self, term_months: u32) -> Decimal {
        highest_tier(&self.term_surcharges, &term_months)
            .map(|tier| tier.adjustment)
            .unwrap_or(Decimal::ZERO)
    }

    /// Annual rate for a loan of `amount` over `term_months`.
    pub fn rate(&self, amount: Decimal, term_months: u32) -> Decimal {
        let rate =
            self.base_rate - self.amount_discount(amount) + self.term_surcharge(term_months);
        rate.max(self.floor_rate)
    }
}
