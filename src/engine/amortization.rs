//! Annuity payment and amortization schedule.

use crate::core::payment::Payment;
use crate::engine::SimulationError;
use chrono::{Months, NaiveDate};
use log::trace;
use rust_decimal::Decimal;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);
const PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Monthly periodic rate for an annual nominal percentage.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT
}

/// `(1 + rate)^-periods` by repeated division.
///
/// For positive rates the factor shrinks toward zero, so long terms never
/// leave the decimal range. `None` only when `1 + rate` is zero or the
/// factor grows out of range under a negative rate.
fn discount_factor(rate: Decimal, periods: u32) -> Option<Decimal> {
    let base = Decimal::ONE + rate;
    (0..periods).try_fold(Decimal::ONE, |acc, _| acc.checked_div(base))
}

/// `(1 + rate)^-k` for every `k` in `0..=periods`.
fn discount_table(rate: Decimal, periods: u32) -> Option<Vec<Decimal>> {
    let base = Decimal::ONE + rate;
    let mut table = Vec::with_capacity(periods as usize + 1);
    let mut factor = Decimal::ONE;
    table.push(factor);
    for _ in 0..periods {
        factor = factor.checked_div(base)?;
        table.push(factor);
    }
    Some(table)
}

fn validate(amount: Decimal, term_months: u32) -> Result<(), SimulationError> {
    if amount <= Decimal::ZERO {
        return Err(SimulationError::InvalidAmount { amount });
    }
    if term_months == 0 {
        return Err(SimulationError::InvalidTerm { term: term_months });
    }
    Ok(())
}

/// Fixed monthly installment that repays `amount` over `term_months`.
///
/// Uses the annuity formula in its discounted form `A·r / (1 − (1+r)^−n)`,
/// which equals `A·r(1+r)^n / ((1+r)^n − 1)` and stays in range for any
/// term. A zero rate falls back to straight-line repayment `A / n`.
///
/// # Examples
///
/// ```
/// use loan_simulator::engine::amortization::compute_monthly_payment;
/// use rust_decimal_macros::dec;
///
/// let payment = compute_monthly_payment(dec!(90000), dec!(0), 3).unwrap();
/// assert_eq!(payment, dec!(30000));
/// ```
pub fn compute_monthly_payment(
    amount: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Decimal, SimulationError> {
    validate(amount, term_months)?;

    let rate = monthly_rate(annual_rate_percent);
    if rate.is_zero() {
        return Ok(amount / Decimal::from(term_months));
    }

    let overflow = || SimulationError::Overflow { term: term_months };
    let discount = discount_factor(rate, term_months).ok_or_else(overflow)?;
    amount
        .checked_mul(rate)
        .and_then(|numerator| numerator.checked_div(Decimal::ONE - discount))
        .ok_or_else(overflow)
}

/// Due date of installment `number`, that many calendar months after
/// `start`. Short months clamp to their last day.
pub fn payment_date(start: NaiveDate, number: u32) -> Result<NaiveDate, SimulationError> {
    start
        .checked_add_months(Months::new(number))
        .ok_or(SimulationError::DateOutOfRange {
            start,
            months: number,
        })
}

/// Principal still owed once `number` of `term_months` installments are paid.
///
/// This is the present value of the installments left, `P·(1 − (1+r)^−k)/r`
/// for `k` remaining, which is what subtracting each month's principal from
/// the running balance yields without accumulating rounding error.
fn remaining_balance(
    installment: Decimal,
    rate: Decimal,
    discounts: &[Decimal],
    remaining: u32,
) -> Option<Decimal> {
    if rate.is_zero() {
        return installment.checked_mul(Decimal::from(remaining));
    }
    let discount = discounts.get(remaining as usize)?;
    installment
        .checked_mul(Decimal::ONE - *discount)?
        .checked_div(rate)
}

/// Expand the schedule for an installment already computed.
pub(crate) fn build_schedule(
    amount: Decimal,
    annual_rate_percent: Decimal,
    installment: Decimal,
    term_months: u32,
    start: NaiveDate,
) -> Result<Vec<Payment>, SimulationError> {
    let overflow = || SimulationError::Overflow { term: term_months };
    let rate = monthly_rate(annual_rate_percent);
    let discounts = if rate.is_zero() {
        Vec::new()
    } else {
        discount_table(rate, term_months).ok_or_else(overflow)?
    };

    let mut balance = amount;
    let mut payments = Vec::with_capacity(term_months as usize);

    for number in 1..=term_months {
        let interest = balance.checked_mul(rate).ok_or_else(overflow)?;
        let principal = installment.checked_sub(interest).ok_or_else(overflow)?;
        balance = remaining_balance(installment, rate, &discounts, term_months - number)
            .ok_or_else(overflow)?;

        let payment = Payment {
            number,
            date: payment_date(start, number)?,
            principal,
            interest,
            balance: balance.max(Decimal::ZERO),
            total: installment,
        };
        trace!(
            "installment {}: principal={} interest={} balance={}",
            number,
            payment.principal,
            payment.interest,
            payment.balance
        );
        payments.push(payment);
    }

    Ok(payments)
}

/// Amortization schedule starting from `start`.
///
/// One entry per month, `term_months` entries in order. Money fields depend
/// only on the inputs; dates depend on `start`.
pub fn generate_schedule_from(
    amount: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
    start: NaiveDate,
) -> Result<Vec<Payment>, SimulationError> {
    let installment = compute_monthly_payment(amount, annual_rate_percent, term_months)?;
    build_schedule(amount, annual_rate_percent, installment, term_months, start)
}

/// Amortization schedule starting from today's local date.
pub fn generate_schedule(
    amount: Decimal,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> Result<Vec<Payment>, SimulationError> {
    generate_schedule_from(amount, annual_rate_percent, term_months, crate::engine::today())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(84)), dec!(0.07));
        assert_eq!(monthly_rate(dec!(60)), dec!(0.05));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_discount_factor() {
        assert_eq!(discount_factor(dec!(0.25), 0), Some(Decimal::ONE));
        assert_eq!(discount_factor(dec!(0.25), 2), Some(dec!(0.64)));
        assert_eq!(discount_factor(dec!(-1), 3), None);
    }

    #[test]
    fn test_discount_table_matches_factor() {
        let table = discount_table(dec!(0.07), 24).unwrap();
        assert_eq!(table.len(), 25);
        assert_eq!(table[0], Decimal::ONE);
        assert_eq!(table[24], discount_factor(dec!(0.07), 24).unwrap());
    }

    #[test]
    fn test_monthly_payment_reference_value() {
        // 100 000 at 84% over 12 months; reference 12590.198865502...
        let payment = compute_monthly_payment(dec!(100000), dec!(84), 12).unwrap();
        assert!((payment - dec!(12590.1988655)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_monthly_payment_single_period() {
        // One month: principal plus one month of interest
        let payment = compute_monthly_payment(dec!(100000), dec!(84), 1).unwrap();
        assert!((payment - dec!(107000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let payment = compute_monthly_payment(dec!(100000), Decimal::ZERO, 3).unwrap();
        assert_eq!(payment, dec!(100000) / dec!(3));
    }

    #[test]
    fn test_zero_term_rejected() {
        assert_eq!(
            compute_monthly_payment(dec!(100000), dec!(84), 0),
            Err(SimulationError::InvalidTerm { term: 0 })
        );
        assert_eq!(
            compute_monthly_payment(dec!(100000), Decimal::ZERO, 0),
            Err(SimulationError::InvalidTerm { term: 0 })
        );
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        assert_eq!(
            compute_monthly_payment(Decimal::ZERO, dec!(84), 12),
            Err(SimulationError::InvalidAmount {
                amount: Decimal::ZERO
            })
        );
        assert!(matches!(
            generate_schedule_from(dec!(-5), dec!(84), 12, start()),
            Err(SimulationError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_long_term_converges_to_interest_only() {
        // (1.07)^-1000 is below decimal precision, so the installment is A·r.
        let payment = compute_monthly_payment(dec!(100000), dec!(84), 1_000).unwrap();
        assert!((payment - dec!(7000)).abs() < dec!(0.000001));
        let payment = compute_monthly_payment(dec!(100000), dec!(84), 5_000).unwrap();
        assert!((payment - dec!(7000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_long_term_schedule_repays() {
        let schedule = generate_schedule_from(dec!(100000), dec!(84), 1_000, start()).unwrap();
        assert_eq!(schedule.len(), 1_000);
        assert_eq!(schedule.last().unwrap().balance, Decimal::ZERO);
        // Early decrements fall below decimal precision, so only non-increasing.
        for pair in schedule.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
        }
        let repaid: Decimal = schedule.iter().map(|p| p.principal).sum();
        assert!((repaid - dec!(100000)).abs() < dec!(0.01));
    }

    #[test]
    fn test_installment_out_of_range() {
        // A·(1+r) for a one-month loan exceeds the largest decimal.
        assert_eq!(
            compute_monthly_payment(Decimal::MAX, dec!(84), 1),
            Err(SimulationError::Overflow { term: 1 })
        );
    }

    #[test]
    fn test_schedule_shape() {
        let schedule = generate_schedule_from(dec!(100000), dec!(84), 12, start()).unwrap();
        assert_eq!(schedule.len(), 12);
        for (i, payment) in schedule.iter().enumerate() {
            assert_eq!(payment.number as usize, i + 1);
            assert_eq!(payment.total, schedule[0].total);
            assert!(payment.is_balanced());
        }
    }

    #[test]
    fn test_schedule_first_row() {
        let schedule = generate_schedule_from(dec!(100000), dec!(84), 12, start()).unwrap();
        let first = &schedule[0];
        assert_eq!(first.interest, dec!(7000));
        assert!((first.principal - dec!(5590.1988655)).abs() < dec!(0.000001));
        assert!((first.balance - dec!(94409.8011345)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_schedule_repays_principal() {
        let schedule = generate_schedule_from(dec!(250000), dec!(80), 24, start()).unwrap();
        let repaid: Decimal = schedule.iter().map(|p| p.principal).sum();
        assert!((repaid - dec!(250000)).abs() < dec!(0.01));
        assert!(schedule.last().unwrap().balance < dec!(0.01));
    }

    #[test]
    fn test_schedule_balance_decreases() {
        let schedule = generate_schedule_from(dec!(500000), dec!(81), 36, start()).unwrap();
        for pair in schedule.windows(2) {
            assert!(pair[1].balance < pair[0].balance || pair[1].balance.is_zero());
        }
    }

    #[test]
    fn test_schedule_dates() {
        let schedule = generate_schedule_from(dec!(100000), dec!(84), 3, start()).unwrap();
        assert_eq!(schedule[0].date, NaiveDate::from_ymd_opt(2026, 11, 16).unwrap());
        assert_eq!(schedule[1].date, NaiveDate::from_ymd_opt(2026, 12, 16).unwrap());
        assert_eq!(schedule[2].date, NaiveDate::from_ymd_opt(2027, 1, 16).unwrap());
    }

    #[test]
    fn test_schedule_dates_clamp_to_month_end() {
        let jan_31 = NaiveDate::from_ymd_opt(2027, 1, 31).unwrap();
        let schedule = generate_schedule_from(dec!(100000), dec!(84), 3, jan_31).unwrap();
        assert_eq!(schedule[0].date, NaiveDate::from_ymd_opt(2027, 2, 28).unwrap());
        assert_eq!(schedule[1].date, NaiveDate::from_ymd_opt(2027, 3, 31).unwrap());
        assert_eq!(schedule[2].date, NaiveDate::from_ymd_opt(2027, 4, 30).unwrap());
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = generate_schedule_from(dec!(90000), Decimal::ZERO, 3, start()).unwrap();
        for payment in &schedule {
            assert_eq!(payment.interest, Decimal::ZERO);
            assert_eq!(payment.principal, dec!(30000));
        }
        assert_eq!(schedule[2].balance, Decimal::ZERO);
    }
}
