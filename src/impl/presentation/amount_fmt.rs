use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

/// Standard number decimal places for the given currency
/// (ex. VND = 0, USD = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

/// Format an amount with currency symbol, the currency's number of decimal
/// places, and thousands separators.
///
/// Uses the en locale ('.' as decimal mark, i.e. 1,000.00) regardless of
/// currency, so that reports compare across communes.
pub(crate) fn format_amount(amount: f64, currency: Currency) -> String {
    let decimal_places = decimal_places(currency);
    let scale = 10_i64.pow(decimal_places);
    // Round once, in minor units, so 0.999 USD prints as 1.00 rather than 0.00.
    let minor_units = (amount * scale as f64).round() as i64;
    let sign = if minor_units < 0 { "-" } else { "" };
    let integer_part = (minor_units.abs() / scale).to_formatted_string(&Locale::en);
    if decimal_places == 0 {
        format!("{}{} {}", sign, integer_part, currency.symbol())
    } else {
        format!(
            "{}{}.{:0width$} {}",
            sign,
            integer_part,
            minor_units.abs() % scale,
            currency.symbol(),
            width = decimal_places as usize,
        )
    }
}

/// Percentage with one decimal place.
pub(crate) fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}
