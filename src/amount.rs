//! Exact money handling in integer cents.
//!
//! Amounts travel over the API in major units, either as JSON numbers or as
//! decimal strings. They are converted to cents without going through floats,
//! so `12.34` is always exactly `1234`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Largest accepted magnitude for a single amount: 100 billion in major
/// units. Totals are summed in `i128`, so any number of such amounts adds up
/// exactly.
pub const MAX_AMOUNT_CENTS: i64 = 10_000_000_000_000;

/// Parse a decimal amount in major units (`"12.34"`, `"-3"`, `"0.5"`) into
/// cents. Rejects anything with more than two fractional digits.
pub fn parse_cents(s: &str) -> Option<i64> {
    parse_decimal_cents(s, false)
}

/// Like [`parse_cents`] but rounds extra fractional digits half away from zero.
pub fn parse_cents_rounded(s: &str) -> Option<i64> {
    parse_decimal_cents(s, true)
}

fn parse_decimal_cents(s: &str, round: bool) -> Option<i64> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 2 && !round {
        return None;
    }

    let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let frac_bytes = frac.as_bytes();
    let digit = |i: usize| frac_bytes.get(i).map_or(0, |b| i64::from(b - b'0'));
    let mut frac_cents = digit(0) * 10 + digit(1);
    if digit(2) >= 5 {
        frac_cents += 1;
    }

    let cents = whole.checked_mul(100)?.checked_add(frac_cents)?;
    if cents > MAX_AMOUNT_CENTS {
        return None;
    }
    Some(if negative { -cents } else { cents })
}

/// Convert a JSON value (number or numeric string) into cents.
pub fn cents_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => parse_cents(&n.to_string()),
        Value::String(s) => parse_cents(s),
        _ => None,
    }
}

/// Lenient conversion used for loosely typed input: anything that is not a
/// number, or is out of range, counts as zero.
pub fn lossy_cents(value: &Value) -> i64 {
    let parsed = match value {
        Value::Number(n) => parse_cents_rounded(&n.to_string()),
        Value::String(s) => parse_cents_rounded(s),
        _ => None,
    };
    parsed.unwrap_or(0)
}

pub fn format_cents(cents: impl Into<i128>) -> String {
    let cents: i128 = cents.into();
    let is_negative = cents < 0;
    let abs_cents = cents.unsigned_abs();
    let dollars = abs_cents / 100;
    let remainder = abs_cents % 100;

    if is_negative {
        format!("-{}.{:02}", dollars, remainder)
    } else {
        format!("{}.{:02}", dollars, remainder)
    }
}

pub fn deserialize_cents<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    cents_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", value)))
}

pub fn deserialize_optional_cents<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => cents_from_value(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", v))),
    }
}
