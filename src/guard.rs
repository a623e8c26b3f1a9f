// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Write-once guard.
//!
//! A register may only be written while every byte of its span is zero; the
//! only way back to a writable state is an explicit clear. The check covers
//! the whole batch before anything is mutated.

use crate::error::{RegisterError, RegisterResult};
use crate::storage::window::RegisterWindow;
use crate::types::address::AddressDescriptor;

pub struct WriteGuard;

impl WriteGuard {
    /// Returns `WriteConflict` listing every target that holds a non-zero byte.
    pub fn check_writable(
        window: &RegisterWindow,
        targets: &[AddressDescriptor],
    ) -> RegisterResult<()> {
        let offending: Vec<u64> = targets
            .iter()
            .filter(|desc| !Self::is_clear(window, desc))
            .map(|desc| desc.address())
            .collect();

        if offending.is_empty() {
            Ok(())
        } else {
            Err(RegisterError::WriteConflict { addresses: offending })
        }
    }

    pub fn is_clear(window: &RegisterWindow, desc: &AddressDescriptor) -> bool {
        window.raw_slice(desc).iter().all(|b| *b == 0)
    }
}
