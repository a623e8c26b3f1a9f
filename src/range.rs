// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Range expansion for batch operations.
//!
//! A range is either `start..=end` or `count` registers from `start`, stepped
//! by the access width. Expansion validates every address and fails on the
//! first invalid one, so callers never see a partial sequence.

use crate::config::SIZE;
use crate::error::{RegisterError, RegisterResult};
use crate::types::address::AddressDescriptor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeRequest {
    /// Inclusive end bound.
    Bounded { start: u64, end: u64, width: u64 },
    /// `count` registers starting at `start`.
    Counted { start: u64, count: i64, width: u64 },
}

impl RangeRequest {
    /// Builds a request from optional bounds. `count` takes precedence when
    /// both are present.
    pub fn from_parts(
        start: u64,
        end: Option<u64>,
        count: Option<i64>,
        width: u64,
    ) -> RegisterResult<Self> {
        match (count, end) {
            (Some(count), _) => Ok(RangeRequest::Counted { start, count, width }),
            (None, Some(end)) => Ok(RangeRequest::Bounded { start, end, width }),
            (None, None) => Err(RegisterError::MissingBound),
        }
    }

    pub fn width(&self) -> u64 {
        match *self {
            RangeRequest::Bounded { width, .. } | RangeRequest::Counted { width, .. } => width,
        }
    }

    /// Resolves to ascending, validated addresses.
    pub fn expand(&self) -> RegisterResult<Vec<AddressDescriptor>> {
        let (start, end, width) = match *self {
            RangeRequest::Counted { start, count, width } => {
                if count <= 0 {
                    return Err(RegisterError::InvalidCount(count));
                }
                let span = width.saturating_mul(count as u64 - 1);
                (start, start.saturating_add(span), width)
            }
            RangeRequest::Bounded { start, end, width } => (start, end, width),
        };
        if end < start {
            return Err(RegisterError::InvalidBounds { start, end });
        }
        walk(start, end, width)
    }
}

/// Expands `start` with either an `end` bound or a `count`.
pub fn expand(
    start: u64,
    end: Option<u64>,
    count: Option<i64>,
    width: u64,
) -> RegisterResult<Vec<AddressDescriptor>> {
    RangeRequest::from_parts(start, end, count, width)?.expand()
}

fn walk(start: u64, end: u64, width: u64) -> RegisterResult<Vec<AddressDescriptor>> {
    let hint = ((end - start) / width.max(1)).saturating_add(1).min(SIZE as u64) as usize;
    let mut addrs = Vec::with_capacity(hint);
    let mut addr = start;
    while addr <= end {
        addrs.push(AddressDescriptor::new(addr, width)?);
        match addr.checked_add(width) {
            Some(next) => addr = next,
            None => break,
        }
    }
    Ok(addrs)
}
