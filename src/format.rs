//! Presentation formatting for report surfaces.
//!
//! The engine keeps full precision; these helpers are where amounts get
//! rounded (half away from zero, 2 places).

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount in Kina, e.g. `K1,234.56` or `-K1,234.56`.
///
/// # Examples
///
/// ```
/// use png_tax_engine::format::format_kina;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_kina(Decimal::new(123456, 2)), "K1,234.56");
/// ```
pub fn format_kina(amount: Decimal) -> String {
    let rounded = round_2dp(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}K{}", sign, grouped(rounded.abs()))
}

/// Formats a fractional rate as a percentage, e.g. `0.0692` as `6.92%`.
pub fn format_percentage(rate: Decimal) -> String {
    let percent = round_2dp(rate * Decimal::ONE_HUNDRED);
    let sign = if percent.is_sign_negative() && !percent.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}%", sign, grouped(percent.abs()))
}

fn round_2dp(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// `value` must be non-negative with at most 2 decimal places.
fn grouped(value: Decimal) -> String {
    let whole = value.trunc();
    let cents = ((value - whole) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);
    let whole = whole
        .to_u128()
        .map(|w| w.to_formatted_string(&Locale::en))
        .unwrap_or_else(|| whole.to_string());
    format!("{}.{:02}", whole, cents)
}
