//! Decimal string ↔ base-unit conversion.
//!
//! `parse_units("1.5", 18)` gives `1_500_000_000_000_000_000`;
//! `format_units(1_500_000_000_000_000_000, 18)` gives `"1.5"`.
//! Whole values keep one fractional digit (`"1.0"`), matching how wallets
//! print ether amounts. No floating-point is involved.

use crate::DECIMALS;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    Empty,
    InvalidCharacter(char),
    TooManyDecimals { max: u8 },
    Overflow,
}

impl fmt::Display for UnitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitsError::Empty => write!(f, "Empty amount"),
            UnitsError::InvalidCharacter(c) => write!(f, "Invalid character '{}' in amount", c),
            UnitsError::TooManyDecimals { max } => {
                write!(f, "Amount has more than {} decimal places", max)
            }
            UnitsError::Overflow => write!(f, "Amount exceeds u128"),
        }
    }
}

impl std::error::Error for UnitsError {}

/// Parse a non-negative decimal string into base units.
pub fn parse_units(value: &str, decimals: u8) -> Result<u128, UnitsError> {
    let value = value.trim().replace('_', "");
    if value.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, frac) = match value.split_once('.') {
        Some((w, f)) => (w, f),
        None => (value.as_str(), ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(UnitsError::Empty);
    }
    if let Some(c) = whole.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
        return Err(UnitsError::InvalidCharacter(c));
    }

    // Trailing zeros past the precision are harmless ("1.50" at 1 decimal)
    let frac = frac.trim_end_matches('0');
    if frac.len() > decimals as usize {
        return Err(UnitsError::TooManyDecimals { max: decimals });
    }

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or(UnitsError::Overflow)?;
    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| UnitsError::Overflow)?
    };
    let frac_units: u128 = if frac.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac, width = decimals as usize);
        padded.parse().map_err(|_| UnitsError::Overflow)?
    };

    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or(UnitsError::Overflow)
}

/// Render base units as a decimal string.
pub fn format_units(amount: u128, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let digits = format!("{:0>width$}", amount, width = decimals as usize + 1);
    let (whole, frac) = digits.split_at(digits.len() - decimals as usize);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}.0", whole)
    } else {
        format!("{}.{}", whole, frac)
    }
}

/// `parse_units(value, 18)`
pub fn parse_ether(value: &str) -> Result<u128, UnitsError> {
    parse_units(value, DECIMALS)
}

/// `format_units(amount, 18)`
pub fn format_ether(amount: u128) -> String {
    format_units(amount, DECIMALS)
}
