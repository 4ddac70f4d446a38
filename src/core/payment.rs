use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Largest drift allowed between the split and the installment.
const SPLIT_TOLERANCE: Decimal = dec!(0.000001);

/// One row of an amortization schedule.
///
/// Each month the fixed installment (`total`) is split between interest on
/// the outstanding balance and repayment of principal. `balance` is what
/// remains owed after this installment and never goes below zero.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::payment::Payment;
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
///
/// let payment = Payment {
///     number: 1,
///     date: NaiveDate::from_ymd_opt(2026, 11, 16).unwrap(),
///     principal: dec!(5590.20),
///     interest: dec!(7000),
///     balance: dec!(94409.80),
///     total: dec!(12590.20),
/// };
/// assert!(payment.is_balanced());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// 1-based month index within the schedule.
    pub number: u32,
    /// Due date of the installment.
    pub date: NaiveDate,
    /// Portion of the installment that repays principal.
    pub principal: Decimal,
    /// Portion of the installment that pays interest.
    pub interest: Decimal,
    /// Principal still owed after this installment.
    pub balance: Decimal,
    /// The fixed monthly installment.
    pub total: Decimal,
}

impl Payment {
    /// Whether `principal + interest` matches the installment, up to
    /// decimal rounding.
    pub fn is_balanced(&self) -> bool {
        (self.principal + self.interest - self.total).abs() <= SPLIT_TOLERANCE
    }
}
