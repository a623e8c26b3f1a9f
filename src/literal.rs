// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Integer literal parsing for the transports.
//!
//! Accepts an optional sign, a `0x`/`0o`/`0b` radix prefix (any case), `_`
//! between digits, and plain decimal without leading zeros (`0`, `00` are
//! fine). The register operations themselves only ever see typed integers.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid integer literal {0:?} (use 0x... for hex)")]
pub struct LiteralError(pub String);

/// Parses a literal into a signed 128-bit integer so negative and oversized
/// inputs can be reported distinctly by the caller.
pub fn parse_int(raw: &str) -> Result<i128, LiteralError> {
    let err = || LiteralError(raw.to_string());
    let text = raw.trim();

    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let lower = body.to_ascii_lowercase();
    let (radix, digits) = if let Some(rest) = lower.strip_prefix("0x") {
        (16, rest)
    } else if let Some(rest) = lower.strip_prefix("0o") {
        (8, rest)
    } else if let Some(rest) = lower.strip_prefix("0b") {
        (2, rest)
    } else {
        (10, lower.as_str())
    };

    // After a radix prefix one leading underscore is allowed ("0x_ff").
    let digits = if radix != 10 {
        digits.strip_prefix('_').unwrap_or(digits)
    } else {
        digits
    };

    if digits.is_empty()
        || digits.starts_with('_')
        || digits.ends_with('_')
        || digits.contains("__")
    {
        return Err(err());
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if !cleaned.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(err());
    }

    let leading_zero = cleaned.len() > 1 && cleaned.starts_with('0');
    if radix == 10 && leading_zero && cleaned.bytes().any(|b| b != b'0') {
        return Err(err());
    }

    let magnitude = i128::from_str_radix(&cleaned, radix).map_err(|_| err())?;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Parses a literal that must be a non-negative value fitting in `u64`.
pub fn parse_u64(raw: &str) -> Result<u64, LiteralError> {
    let v = parse_int(raw)?;
    u64::try_from(v).map_err(|_| LiteralError(raw.to_string()))
}
