//! The loan simulation engine.
//!
//! Pure, synchronous computation: a principal and a term go in, a
//! [`LoanSimulation`] comes out. The only external input is the local
//! calendar date used to anchor the schedule when no start date is given.

pub mod amortization;
pub mod rate;

use crate::core::simulation::LoanSimulation;
use crate::engine::amortization::{build_schedule, compute_monthly_payment};
use crate::engine::rate::RatePolicy;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors from misuse of the engine. Product-range validation is not
/// performed here; see [`crate::policy::limits`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("term must be at least 1 month, got {term}")]
    InvalidTerm { term: u32 },
    #[error("loan amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("payment date {months} months after {start} is out of calendar range")]
    DateOutOfRange { start: NaiveDate, months: u32 },
    #[error("loan over {term} months exceeds decimal range")]
    Overflow { term: u32 },
}

/// Today's date on the local calendar.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Runs simulations under a given [`RatePolicy`].
///
/// The default engine applies the product rate policy.
///
/// # Examples
///
/// ```
/// use loan_simulator::engine::LoanSimulationEngine;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let engine = LoanSimulationEngine::default();
/// let start = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
/// let simulation = engine.simulate_from(dec!(100000), 12, start).unwrap();
///
/// assert_eq!(simulation.interest_rate(), dec!(84));
/// assert_eq!(simulation.payments().len(), 12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoanSimulationEngine {
    policy: RatePolicy,
}

impl LoanSimulationEngine {
    pub fn new(policy: RatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &RatePolicy {
        &self.policy
    }

    /// Annual rate the policy assigns to `(amount, term_months)`.
    pub fn interest_rate(&self, amount: Decimal, term_months: u32) -> Decimal {
        self.policy.rate(amount, term_months)
    }

    /// Simulate a loan whose schedule starts today.
    pub fn simulate(
        &self,
        amount: Decimal,
        term_months: u32,
    ) -> Result<LoanSimulation, SimulationError> {
        self.simulate_from(amount, term_months, today())
    }

    /// Simulate a loan whose first installment falls one month after `start`.
    ///
    /// # Algorithm
    ///
    /// 1. Derive the annual rate from the policy tiers.
    /// 2. Compute the fixed installment with the annuity formula.
    /// 3. Expand the month-by-month schedule.
    /// 4. Total payment = installment × term; total interest = total − amount.
    pub fn simulate_from(
        &self,
        amount: Decimal,
        term_months: u32,
        start: NaiveDate,
    ) -> Result<LoanSimulation, SimulationError> {
        let interest_rate = self.interest_rate(amount, term_months);
        let monthly_payment = compute_monthly_payment(amount, interest_rate, term_months)?;
        let payments = build_schedule(amount, interest_rate, monthly_payment, term_months, start)?;

        let overflow = || SimulationError::Overflow { term: term_months };
        let total_payment = monthly_payment
            .checked_mul(Decimal::from(term_months))
            .ok_or_else(overflow)?;
        let total_interest = total_payment.checked_sub(amount).ok_or_else(overflow)?;

        debug!(
            "simulated {} over {} months: rate={}% installment={} total={}",
            amount, term_months, interest_rate, monthly_payment, total_payment
        );

        Ok(LoanSimulation {
            amount,
            term: term_months,
            interest_rate,
            monthly_payment,
            total_interest,
            total_payment,
            start_date: start,
            payments,
        })
    }
}

/// Annual rate under the product policy.
pub fn derive_interest_rate(amount: Decimal, term_months: u32) -> Decimal {
    RatePolicy::default().rate(amount, term_months)
}

/// Simulate a loan under the product policy, starting today.
///
/// This is the entry point the simulator, review step and application
/// snapshot all go through.
pub fn simulate_loan(amount: Decimal, term_months: u32) -> Result<LoanSimulation, SimulationError> {
    LoanSimulationEngine::default().simulate(amount, term_months)
}
