use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How amounts are entered, divided and displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountMode {
    /// Two fraction digits, e.g. `1,234.50`.
    #[default]
    Decimal,
    /// Whole units only, e.g. `1,234`.
    Integer,
}

impl AmountMode {
    pub fn fraction_digits(self) -> u32 {
        match self {
            AmountMode::Decimal => 2,
            AmountMode::Integer => 0,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid amount: {0:?}")]
    Invalid(String),
    #[error("amount {0:?} is out of range")]
    TooLarge(String),
}

/// Largest magnitude accepted from the user. Keeps every sum and product the
/// split form does well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

fn strip_grouping(text: &str) -> String {
    text.trim().chars().filter(|c| *c != ',').collect()
}

/// Parses an amount typed by the user. Grouping commas are ignored; anything
/// else that is not part of a plain signed decimal number is rejected.
pub fn try_parse_amount(text: &str) -> Result<Decimal, AmountError> {
    let cleaned = strip_grouping(text);
    if cleaned.is_empty() {
        return Err(AmountError::Empty);
    }
    let (prefix, rest) = split_numeric_prefix(&cleaned);
    if prefix.is_empty() || !rest.is_empty() {
        return Err(AmountError::Invalid(text.to_string()));
    }
    let value = parse_prefix(prefix).ok_or_else(|| AmountError::Invalid(text.to_string()))?;
    check_range(value, text)
}

fn check_range(value: Decimal, text: &str) -> Result<Decimal, AmountError> {
    if value.abs() > MAX_AMOUNT {
        return Err(AmountError::TooLarge(text.to_string()));
    }
    Ok(value)
}

/// Lenient parse used by the split form: reads the longest numeric prefix
/// (`"12abc"` is 12) and falls back to zero when there is none.
pub fn parse_amount(text: &str) -> Decimal {
    match try_parse_amount(text) {
        Ok(value) => value,
        Err(AmountError::Empty) => Decimal::ZERO,
        Err(err @ AmountError::TooLarge(_)) => {
            log::warn!("{}; treating it as 0", err);
            Decimal::ZERO
        }
        Err(err) => {
            let cleaned = strip_grouping(text);
            let (prefix, _) = split_numeric_prefix(&cleaned);
            match parse_prefix(prefix).map(|v| check_range(v, text)) {
                Some(Ok(value)) => {
                    log::debug!("{}; using leading number {}", err, value);
                    value
                }
                Some(Err(too_large)) => {
                    log::warn!("{}; treating it as 0", too_large);
                    Decimal::ZERO
                }
                None => {
                    log::warn!("{}; treating it as 0", err);
                    Decimal::ZERO
                }
            }
        }
    }
}

// Splits `s` into `[+-]?digits(.digits)?` and the remainder.
fn split_numeric_prefix(s: &str) -> (&str, &str) {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - end - 1;
        if frac_digits > 0 || digits > 0 {
            digits += frac_digits;
            end = frac_end;
        }
    }
    if digits == 0 {
        return ("", s);
    }
    s.split_at(end)
}

fn parse_prefix(prefix: &str) -> Option<Decimal> {
    if prefix.is_empty() {
        return None;
    }
    let unsigned = prefix.trim_start_matches(['+', '-']);
    let negative = prefix.starts_with('-');
    // "5." and ".5" are valid inputs but not valid Decimal literals.
    let mut normalized = String::with_capacity(unsigned.len() + 2);
    if unsigned.starts_with('.') {
        normalized.push('0');
    }
    normalized.push_str(unsigned.trim_end_matches('.'));
    let value = Decimal::from_str(&normalized).ok()?;
    Some(if negative { -value } else { value })
}

fn group_thousands(digits: &str) -> String {
    let s = digits.chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in s.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(*ch);
    }
    out.into_iter().rev().collect()
}

/// Formats `value` with `,` grouping and the number of fraction digits the
/// mode calls for. Midpoints round away from zero.
pub fn format_amount(value: Decimal, mode: AmountMode) -> String {
    let dp = mode.fraction_digits();
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let is_negative = rounded.is_sign_negative() && !rounded.is_zero();
    let plain = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    let mut out = String::new();
    if is_negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{}{}{}",
        sign,
        symbol,
        format_amount(amount.abs(), AmountMode::Decimal)
    )
}
