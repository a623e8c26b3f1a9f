// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error("bad width {0} (must be 1, 2, 4 or 8)")]
    InvalidWidth(u64),

    #[error("address {address:#x} (width {width}) out of allowed range")]
    OutOfRange { address: u64, width: u64 },

    #[error("misaligned address {address:#x} (must be aligned to width {width})")]
    Misaligned { address: u64, width: u64 },

    #[error("either end or count must be provided")]
    MissingBound,

    #[error("count must be >= 1, got {0}")]
    InvalidCount(i64),

    #[error("end {end:#x} must be >= start {start:#x}")]
    InvalidBounds { start: u64, end: u64 },

    /// Value is negative or needs more than `width` bytes.
    #[error("value {value} too large for width {width}")]
    ValueOverflow { value: i128, width: u64 },

    /// Target bytes already hold data. Lists every offending address in ascending order.
    #[error("existing non-zero at addresses: {}", format_addresses(.addresses))]
    WriteConflict { addresses: Vec<u64> },

    #[error("values list length {found} must equal resolved address count {expected}")]
    ValuesLengthMismatch { expected: usize, found: usize },

    #[error("provide either a values list or a single value")]
    MissingValues,

    #[error("clear-all requires explicit confirmation")]
    ConfirmationRequired,
}

impl RegisterError {
    /// Stable name of the error kind, used by transports in their error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            RegisterError::InvalidWidth(_) => "InvalidWidth",
            RegisterError::OutOfRange { .. } => "OutOfRange",
            RegisterError::Misaligned { .. } => "Misaligned",
            RegisterError::MissingBound => "MissingBound",
            RegisterError::InvalidCount(_) => "InvalidCount",
            RegisterError::InvalidBounds { .. } => "InvalidBounds",
            RegisterError::ValueOverflow { .. } => "ValueOverflow",
            RegisterError::WriteConflict { .. } => "WriteConflict",
            RegisterError::ValuesLengthMismatch { .. } => "ValuesLengthMismatch",
            RegisterError::MissingValues => "MissingValues",
            RegisterError::ConfirmationRequired => "ConfirmationRequired",
        }
    }
}

fn format_addresses(addresses: &[u64]) -> String {
    addresses
        .iter()
        .map(|a| format!("{:#x}", a))
        .collect::<Vec<_>>()
        .join(",")
}

pub type RegisterResult<T> = std::result::Result<T, RegisterError>;
