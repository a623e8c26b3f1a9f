// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Access widths.

use crate::error::{RegisterError, RegisterResult};

/// Natural access width of a register, in bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Width {
    Byte = 1,
    Half = 2,
    Word = 4,
    Double = 8,
}

impl Width {
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn as_u64(self) -> u64 {
        self as u64
    }

    /// Largest value storable in this width.
    pub const fn max_value(self) -> u64 {
        match self {
            Width::Double => u64::MAX,
            w => (1u64 << (8 * w.bytes())) - 1,
        }
    }

    pub fn fits(self, value: u64) -> bool {
        value <= self.max_value()
    }

    /// Narrows a wide (possibly negative) request value to one that fits.
    pub fn narrow(self, value: i128) -> RegisterResult<u64> {
        u64::try_from(value)
            .ok()
            .filter(|v| self.fits(*v))
            .ok_or(RegisterError::ValueOverflow {
                value,
                width: self.as_u64(),
            })
    }
}

impl TryFrom<u64> for Width {
    type Error = RegisterError;

    fn try_from(raw: u64) -> RegisterResult<Self> {
        match raw {
            1 => Ok(Width::Byte),
            2 => Ok(Width::Half),
            4 => Ok(Width::Word),
            8 => Ok(Width::Double),
            other => Err(RegisterError::InvalidWidth(other)),
        }
    }
}

impl From<Width> for u64 {
    fn from(w: Width) -> u64 {
        w.as_u64()
    }
}

impl core::fmt::Display for Width {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.bytes())
    }
}
