//! Product limits enforced by the calling layer before simulating.

use crate::core::format::format_currency;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Field-level validation failures, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Amount and term ranges offered by the simulator.
///
/// # Examples
///
/// ```
/// use loan_simulator::policy::limits::ProductLimits;
/// use rust_decimal_macros::dec;
///
/// let limits = ProductLimits::default();
/// assert!(limits.validate(dec!(100000), 12).is_ok());
///
/// let errors = limits.validate(dec!(5000), 72).unwrap_err();
/// assert!(errors.get("amount").is_some());
/// assert!(errors.get("term").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductLimits {
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    /// Amounts move in increments of this size.
    pub amount_step: Decimal,
    pub min_term: u32,
    pub max_term: u32,
}

impl Default for ProductLimits {
    fn default() -> Self {
        Self {
            min_amount: dec!(10_000),
            max_amount: dec!(2_500_000),
            amount_step: dec!(10_000),
            min_term: 1,
            max_term: 60,
        }
    }
}

impl ProductLimits {
    /// Check a requested loan against the product ranges.
    ///
    /// Every failing field is reported, not just the first.
    pub fn validate(&self, amount: Decimal, term_months: u32) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if amount < self.min_amount || amount > self.max_amount {
            errors.add(
                "amount",
                format!(
                    "amount must be between {} and {}",
                    format_currency(self.min_amount),
                    format_currency(self.max_amount)
                ),
            );
        } else if !self.amount_step.is_zero() && !(amount % self.amount_step).is_zero() {
            errors.add(
                "amount",
                format!(
                    "amount must be a multiple of {}",
                    format_currency(self.amount_step)
                ),
            );
        }

        if term_months < self.min_term || term_months > self.max_term {
            errors.add(
                "term",
                format!(
                    "term must be between {} and {} months",
                    self.min_term, self.max_term
                ),
            );
        }

        errors.into_result()
    }

    /// Nearest allowed amount: rounded to the step, then clamped to range.
    pub fn snap_amount(&self, amount: Decimal) -> Decimal {
        let stepped = if self.amount_step.is_zero() {
            amount
        } else {
            (amount / self.amount_step)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                * self.amount_step
        };
        stepped.max(self.min_amount).min(self.max_amount)
    }

    /// Term clamped to range.
    pub fn snap_term(&self, term_months: u32) -> u32 {
        term_months.clamp(self.min_term, self.max_term)
    }
}
