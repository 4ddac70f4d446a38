use crate::core::format::{format_currency, format_date, format_percentage, format_term};
use crate::core::payment::Payment;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Installments shown per page of the payment calendar.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// The result of simulating a loan.
///
/// Immutable once produced: a new simulation is computed for every
/// `(amount, term)` pair and replaces the previous one wholesale.
///
/// Invariants:
/// - `payments().len() == term()`, numbered `1..=term` in order.
/// - `total_payment() == monthly_payment() × term()`.
/// - `total_interest() == total_payment() − amount()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSimulation {
    pub(crate) amount: Decimal,
    pub(crate) term: u32,
    /// Annual nominal percentage.
    pub(crate) interest_rate: Decimal,
    pub(crate) monthly_payment: Decimal,
    pub(crate) total_interest: Decimal,
    pub(crate) total_payment: Decimal,
    /// Date the schedule is anchored on; installment `n` is due `n` months later.
    pub(crate) start_date: NaiveDate,
    pub(crate) payments: Vec<Payment>,
}

/// A window onto the payment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulePage<'a> {
    /// Zero-based page index.
    pub index: usize,
    pub page_count: usize,
    pub payments: &'a [Payment],
}

impl SchedulePage<'_> {
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.page_count
    }
}

impl LoanSimulation {
    // --- Accessors ---

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn term(&self) -> u32 {
        self.term
    }

    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    pub fn total_payment(&self) -> Decimal {
        self.total_payment
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    // --- Schedule views ---

    pub fn first_payment_date(&self) -> Option<NaiveDate> {
        self.payments.first().map(|p| p.date)
    }

    pub fn last_payment_date(&self) -> Option<NaiveDate> {
        self.payments.last().map(|p| p.date)
    }

    /// Number of pages of `per_page` installments, zero when `per_page` is zero.
    pub fn page_count(&self, per_page: usize) -> usize {
        if per_page == 0 {
            return 0;
        }
        self.payments.len().div_ceil(per_page)
    }

    /// Page `index` (zero-based) of the schedule.
    ///
    /// Returns `None` past the last page or when `per_page` is zero.
    pub fn page(&self, index: usize, per_page: usize) -> Option<SchedulePage<'_>> {
        let page_count = self.page_count(per_page);
        if index >= page_count {
            return None;
        }
        let start = index * per_page;
        let end = (start + per_page).min(self.payments.len());
        Some(SchedulePage {
            index,
            page_count,
            payments: &self.payments[start..end],
        })
    }

    /// Principal as a percentage of everything repaid.
    pub fn principal_share(&self) -> f64 {
        self.share_of_total(self.amount)
    }

    /// Interest as a percentage of everything repaid.
    pub fn interest_share(&self) -> f64 {
        self.share_of_total(self.total_interest)
    }

    fn share_of_total(&self, part: Decimal) -> f64 {
        let total = self.amount + self.total_interest;
        if total.is_zero() {
            return 0.0;
        }
        (part / total * Decimal::ONE_HUNDRED).to_f64().unwrap_or(0.0)
    }
}

impl std::fmt::Display for LoanSimulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Loan Simulation ===")?;
        writeln!(f, "Amount:          {}", format_currency(self.amount))?;
        writeln!(f, "Term:            {}", format_term(self.term))?;
        writeln!(f, "Interest Rate:   {} annual", format_percentage(self.interest_rate))?;
        writeln!(f, "Monthly Payment: {}", format_currency(self.monthly_payment))?;
        writeln!(f, "Total Interest:  {}", format_currency(self.total_interest))?;
        writeln!(f, "Total Payment:   {}", format_currency(self.total_payment))?;
        if let (Some(first), Some(last)) = (self.first_payment_date(), self.last_payment_date()) {
            writeln!(f, "First Payment:   {}", format_date(first))?;
            writeln!(f, "Last Payment:    {}", format_date(last))?;
        }
        writeln!(
            f,
            "Split:           {:.1}% principal / {:.1}% interest",
            self.principal_share(),
            self.interest_share()
        )?;
        Ok(())
    }
}

impl std::fmt::Display for SchedulePage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "--- Page {} of {} ---", self.index + 1, self.page_count)?;
        writeln!(
            f,
            "{:>4}  {:<12} {:>14} {:>14} {:>14} {:>14}",
            "#", "Date", "Installment", "Principal", "Interest", "Balance"
        )?;
        for p in self.payments {
            writeln!(
                f,
                "{:>4}  {:<12} {:>14} {:>14} {:>14} {:>14}",
                p.number,
                format_date(p.date),
                format_currency(p.total),
                format_currency(p.principal),
                format_currency(p.interest),
                format_currency(p.balance)
            )?;
        }
        Ok(())
    }
}
