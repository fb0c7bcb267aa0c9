use rust_decimal::Decimal;
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Parse a stored amount, accepting plain (`2500000.0`) or scientific (`2.5e+06`) notation
pub fn parse_decimal(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| AppError::internal(format!("Invalid stored amount '{}': {}", raw, e)))
}

/// Render a decimal with comma thousands separators, e.g. `5000000` -> `5,000,000`
pub fn format_thousands(value: Decimal) -> String {
    let rendered = value.normalize().to_string();
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match fraction {
        Some(fraction) => format!("{}{}.{}", sign, grouped, fraction),
        None => format!("{}{}", sign, grouped),
    }
}
