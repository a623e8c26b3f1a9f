pub mod commands;

use vreg_kernel::literal::parse_int;

/// clap value parser for addresses and other non-negative literals.
pub fn parse_literal(raw: &str) -> Result<u64, String> {
    vreg_kernel::literal::parse_u64(raw).map_err(|e| e.to_string())
}

/// clap value parser for counts; out-of-range counts saturate and are
/// rejected later by range expansion.
pub fn parse_count(raw: &str) -> Result<i64, String> {
    let v = parse_int(raw).map_err(|e| e.to_string())?;
    Ok(i64::try_from(v).unwrap_or(if v < 0 { i64::MIN } else { i64::MAX }))
}
