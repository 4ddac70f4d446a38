use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Locale rules for rendering a currency amount.
///
/// The default follows the es-AR convention used on the simulator pages:
/// `$` followed by a non-breaking space, `.` as the thousands separator and
/// no decimal places.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::currency::CurrencyFormat;
/// use rust_decimal_macros::dec;
///
/// let fmt = CurrencyFormat::default();
/// assert_eq!(fmt.format(dec!(2500000)), "$\u{a0}2.500.000");
/// assert_eq!(fmt.format(dec!(12590.50)), "$\u{a0}12.591");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$\u{a0}".to_string(),
            thousands_separator: '.',
            decimal_separator: ',',
            fraction_digits: 0,
        }
    }
}

impl CurrencyFormat {
    /// Render `value` rounded half away from zero to `fraction_digits`.
    pub fn format(&self, value: Decimal) -> String {
        let rounded =
            value.round_dp_with_strategy(self.fraction_digits, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();

        let digits = format!("{:.*}", self.fraction_digits as usize, rounded.abs());
        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + self.symbol.len() + 4);
        if negative {
            out.push('-');
        }
        out.push_str(&self.symbol);
        out.push_str(&group_thousands(integer, self.thousands_separator));
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }
}

fn group_thousands(integer: &str, separator: char) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
