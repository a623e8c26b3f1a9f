// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Validated register targets.

use crate::config::{BASE, END};
use crate::error::{RegisterError, RegisterResult};
use crate::types::width::Width;

/// An `(address, width)` pair that has passed validation.
///
/// Holding one proves the span `[address, address + width - 1]` lies inside
/// the window and `address` is naturally aligned relative to `BASE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddressDescriptor {
    address: u64,
    width: Width,
}

impl AddressDescriptor {
    /// Checks width, then range, then alignment; the first failure wins.
    pub fn new(address: u64, width: u64) -> RegisterResult<Self> {
        let width = Width::try_from(width)?;
        Self::with_width(address, width)
    }

    pub fn with_width(address: u64, width: Width) -> RegisterResult<Self> {
        let w = width.as_u64();
        let last = address.checked_add(w - 1);
        if address < BASE || last.map_or(true, |last| last > END) {
            return Err(RegisterError::OutOfRange { address, width: w });
        }
        if (address - BASE) % w != 0 {
            return Err(RegisterError::Misaligned { address, width: w });
        }
        Ok(Self { address, width })
    }

    #[inline]
    pub fn address(&self) -> u64 {
        self.address
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    /// Byte offset of the descriptor inside the window.
    #[inline]
    pub fn offset(&self) -> usize {
        (self.address - BASE) as usize
    }

    #[inline]
    pub fn span(&self) -> core::ops::Range<usize> {
        let start = self.offset();
        start..start + self.width.bytes()
    }
}
