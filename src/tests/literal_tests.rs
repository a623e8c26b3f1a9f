// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::literal::{parse_int, parse_u64};

#[test]
fn test_radix_prefixes() {
    assert_eq!(parse_int("0x80000000").unwrap(), 0x8000_0000);
    assert_eq!(parse_int("0X1f").unwrap(), 0x1F);
    assert_eq!(parse_int("0o17").unwrap(), 0o17);
    assert_eq!(parse_int("0b101").unwrap(), 5);
    assert_eq!(parse_int("42").unwrap(), 42);
    assert_eq!(parse_int("  7 ").unwrap(), 7);
}

#[test]
fn test_signs_and_separators() {
    assert_eq!(parse_int("-1").unwrap(), -1);
    assert_eq!(parse_int("+0x10").unwrap(), 16);
    assert_eq!(parse_int("1_000").unwrap(), 1000);
    assert_eq!(parse_int("0x_ff").unwrap(), 255);
    assert_eq!(parse_int("00").unwrap(), 0);
}

#[test]
fn test_rejects_malformed() {
    for bad in ["", "0x", "abc", "1__0", "_1", "1_", "010", "--5", "0x+5", "1.5", "0xg"] {
        assert!(parse_int(bad).is_err(), "accepted {:?}", bad);
    }
}

#[test]
fn test_parse_u64_bounds() {
    assert_eq!(parse_u64("0xffffffffffffffff").unwrap(), u64::MAX);
    assert!(parse_u64("0x10000000000000000").is_err());
    assert!(parse_u64("-1").is_err());
}
