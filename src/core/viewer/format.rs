//! Cell value formatters.

use crate::core::quest::FieldValue;

/// Minimum width of a padded number cell, in characters.
pub const NUMBER_WIDTH: usize = 7;

const NBSP: char = '\u{a0}';

/// Insert `,` thousands separators (en-US grouping).
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Group a float's integer part and keep up to three fraction digits.
fn group_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    match int_part.parse::<i64>() {
        Ok(int) => out.push_str(&group_thousands(int)),
        Err(_) => out.push_str(int_part),
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn pad_start(text: String, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text;
    }
    let mut padded: String = std::iter::repeat(NBSP).take(width - len).collect();
    padded.push_str(&text);
    padded
}

/// Thousands-grouped value without padding. Non-numeric text passes through.
pub fn format_grouped(value: &FieldValue) -> String {
    match value {
        FieldValue::Int(v) => group_thousands(*v),
        other => other
            .as_f64()
            .map(group_float)
            .unwrap_or_else(|| other.to_string()),
    }
}

/// Thousands-grouped value, left-padded with non-breaking spaces to
/// [`NUMBER_WIDTH`] so numbers line up in proportional fonts.
pub fn format_number(value: &FieldValue) -> String {
    pad_start(format_grouped(value), NUMBER_WIDTH)
}

/// Damage resist as a percentage.
pub fn format_dr(value: &FieldValue) -> String {
    format!("{value}%")
}
