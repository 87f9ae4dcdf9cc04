//! pt-BR display formatting for prices, counts and timestamps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::config;

const NBSP: char = '\u{a0}';

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Splits `|value|` rounded to `decimals` places into integer and fraction digits.
fn split_rounded(value: f64, decimals: usize) -> (String, String) {
    let fixed = format!("{:.*}", decimals, value.abs());
    match fixed.split_once('.') {
        Some((int, frac)) => (int.to_string(), frac.to_string()),
        None => (fixed, String::new()),
    }
}

fn is_negative(value: f64, decimals: usize) -> bool {
    value < 0.0 && format!("{:.*}", decimals, value.abs()).chars().any(|c| c != '0' && c != '.')
}

/// `1234.5` → `US$ 1.234,50` (non-breaking space after the symbol).
pub fn format_currency(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let (int, frac) = split_rounded(value, 2);
    let sign = if is_negative(value, 2) { "-" } else { "" };
    format!("{}US${}{},{}", sign, NBSP, group_thousands(&int), frac)
}

/// Currency for a decimal string as sent by the backend.
pub fn format_price(price: &str) -> String {
    format_currency(price.trim().parse::<f64>().unwrap_or(0.0))
}

/// pt-BR grouping with up to three fraction digits.
pub fn format_number(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let (int, frac) = split_rounded(value, 3);
    let frac = frac.trim_end_matches('0');
    let sign = if is_negative(value, 3) { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, group_thousands(&int))
    } else {
        format!("{}{},{}", sign, group_thousands(&int), frac)
    }
}

/// Accepts RFC 3339 and the naive `Y-m-d H:M:S` / date-only forms (read as UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for pattern in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn format_with(value: &str, tz: Tz, pattern: &str) -> String {
    parse_timestamp(value)
        .map(|dt| dt.with_timezone(&tz).format(pattern).to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_date_in(value: &str, tz: Tz) -> String {
    format_with(value, tz, "%d/%m/%Y, %H:%M")
}

pub fn format_date(value: &str) -> String {
    format_date_in(value, config::time_zone())
}

pub fn format_date_only_in(value: &str, tz: Tz) -> String {
    format_with(value, tz, "%d/%m/%Y")
}

pub fn format_date_only(value: &str) -> String {
    format_date_only_in(value, config::time_zone())
}

pub fn format_date_time_seconds_in(value: &str, tz: Tz) -> String {
    format_with(value, tz, "%d/%m/%Y, %H:%M:%S")
}

pub fn format_date_time_seconds(value: &str) -> String {
    format_date_time_seconds_in(value, config::time_zone())
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{America::Sao_Paulo, UTC};

    #[test]
    fn currency_uses_brazilian_separators() {
        assert_eq!(format_currency(1234.56), "US$\u{a0}1.234,56");
        assert_eq!(format_currency(0.5), "US$\u{a0}0,50");
        assert_eq!(format_currency(999.999), "US$\u{a0}1.000,00");
        assert_eq!(format_currency(1_000_000.0), "US$\u{a0}1.000.000,00");
        assert_eq!(format_currency(-15.99), "-US$\u{a0}15,99");
        assert_eq!(format_currency(-0.001), "US$\u{a0}0,00");
        assert_eq!(format_currency(f64::NAN), "US$\u{a0}0,00");
    }

    #[test]
    fn price_strings_are_parsed_before_formatting() {
        assert_eq!(format_price("109.95"), "US$\u{a0}109,95");
        assert_eq!(format_price("abc"), "US$\u{a0}0,00");
    }

    #[test]
    fn numbers_group_thousands_and_trim_fraction() {
        assert_eq!(format_number(1234.0), "1.234");
        assert_eq!(format_number(1234.5), "1.234,5");
        assert_eq!(format_number(0.12345), "0,123");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-1234567.0), "-1.234.567");
    }

    #[test]
    fn dates_render_in_display_time_zone() {
        assert_eq!(
            format_date_in("2024-03-01T12:30:00.000000Z", Sao_Paulo),
            "01/03/2024, 09:30"
        );
        assert_eq!(format_date_in("2024-03-01 12:30:00", UTC), "01/03/2024, 12:30");
        assert_eq!(format_date_only_in("2024-03-01T02:00:00Z", Sao_Paulo), "29/02/2024");
        assert_eq!(
            format_date_time_seconds_in("2024-03-01T12:30:45+00:00", UTC),
            "01/03/2024, 12:30:45"
        );
        assert_eq!(format_date_only_in("2024-12-25", UTC), "25/12/2024");
    }

    #[test]
    fn empty_or_invalid_dates_render_dash() {
        assert_eq!(format_date_in("", UTC), "-");
        assert_eq!(format_date_in("   ", UTC), "-");
        assert_eq!(format_date_in("yesterday", UTC), "-");
        assert_eq!(format_date_only_in("2024-13-40", UTC), "-");
    }

    #[test]
    fn default_time_zone_is_sao_paulo() {
        assert_eq!(format_date("2024-06-01T15:00:00Z"), "01/06/2024, 12:00");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exactly", 7), "exactly");
        assert_eq!(truncate_text("Descrição longa", 9), "Descrição...");
        assert_eq!(truncate_text("", 3), "");
    }
}
