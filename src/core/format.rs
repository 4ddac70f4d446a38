//! es-AR presentation helpers for simulation output.
//!
//! These carry no business logic; they render engine values the way the
//! simulator pages show them.

use crate::core::currency::CurrencyFormat;
use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Whole-peso currency string, e.g. `$ 100.000` (non-breaking space).
pub fn format_currency(value: Decimal) -> String {
    CurrencyFormat::default().format(value)
}

/// Fixed two-decimal percentage, e.g. `84.00%`.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

/// Short es-AR date, e.g. `16 oct 2026`.
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTH_ABBREVIATIONS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Term label with Spanish pluralisation: `1 mes`, `12 meses`.
pub fn format_term(months: u32) -> String {
    if months == 1 {
        "1 mes".to_string()
    } else {
        format!("{} meses", months)
    }
}
