// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::{BASE, END};
use crate::error::RegisterError;
use crate::range::{expand, RangeRequest};

fn addrs(start: u64, end: Option<u64>, count: Option<i64>, width: u64) -> Vec<u64> {
    expand(start, end, count, width)
        .unwrap()
        .iter()
        .map(|d| d.address())
        .collect()
}

#[test]
fn test_expand_by_count() {
    assert_eq!(
        addrs(0x8000_0000, None, Some(4), 4),
        vec![0x8000_0000, 0x8000_0004, 0x8000_0008, 0x8000_000c]
    );
}

#[test]
fn test_expand_by_end_inclusive() {
    assert_eq!(
        addrs(BASE, Some(BASE + 6), None, 2),
        vec![BASE, BASE + 2, BASE + 4, BASE + 6]
    );
    // End that is not on a stride boundary stops at the last full step.
    assert_eq!(addrs(BASE, Some(BASE + 7), None, 4), vec![BASE, BASE + 4]);
    assert_eq!(addrs(BASE, Some(BASE), None, 8), vec![BASE]);
}

#[test]
fn test_count_wins_over_end() {
    assert_eq!(addrs(BASE, Some(BASE + 0x100), Some(2), 4), vec![BASE, BASE + 4]);
}

#[test]
fn test_missing_bound() {
    assert_eq!(expand(BASE, None, None, 4), Err(RegisterError::MissingBound));
}

#[test]
fn test_invalid_count() {
    assert_eq!(expand(BASE, None, Some(0), 4), Err(RegisterError::InvalidCount(0)));
    assert_eq!(expand(BASE, None, Some(-3), 4), Err(RegisterError::InvalidCount(-3)));
}

#[test]
fn test_invalid_bounds() {
    assert_eq!(
        expand(BASE + 8, Some(BASE), None, 4),
        Err(RegisterError::InvalidBounds { start: BASE + 8, end: BASE })
    );
}

#[test]
fn test_first_invalid_address_fails_whole_expansion() {
    // Walks off the end of the window on the third step.
    let res = expand(END - 7, None, Some(3), 4);
    assert_eq!(
        res,
        Err(RegisterError::OutOfRange { address: END + 1, width: 4 })
    );

    let res = expand(BASE + 2, None, Some(2), 4);
    assert!(matches!(res, Err(RegisterError::Misaligned { address, .. }) if address == BASE + 2));
}

#[test]
fn test_invalid_width_surfaces_from_walk() {
    assert_eq!(expand(BASE, None, Some(2), 3), Err(RegisterError::InvalidWidth(3)));
    assert_eq!(expand(BASE, Some(BASE + 8), None, 0), Err(RegisterError::InvalidWidth(0)));
    // Count check still runs first.
    assert_eq!(expand(BASE, None, Some(0), 3), Err(RegisterError::InvalidCount(0)));
}

#[test]
fn test_huge_count_does_not_wrap() {
    let res = expand(BASE, None, Some(i64::MAX), 8);
    assert!(matches!(res, Err(RegisterError::OutOfRange { address, .. }) if address == END + 1));
}

#[test]
fn test_whole_window_expansion() {
    let all = expand(BASE, Some(END), None, 1).unwrap();
    assert_eq!(all.len(), 0x10000);
    assert!(all.windows(2).all(|p| p[0].address() < p[1].address()));
}

#[test]
fn test_range_request_from_parts() {
    let req = RangeRequest::from_parts(BASE, Some(BASE + 4), None, 4).unwrap();
    assert_eq!(req, RangeRequest::Bounded { start: BASE, end: BASE + 4, width: 4 });
    assert_eq!(req.width(), 4);
    assert_eq!(req.expand().unwrap().len(), 2);
}
