// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! vreg-kernel: a fixed-size, write-once, byte-addressable register window.
//!
//! The kernel owns validation, range expansion and the write-once guard.
//! Persistence and transport live in `vreg-persistence` and `vreg-node`.

pub mod config;
pub mod error;
pub mod types;
pub mod storage;
pub mod range;
pub mod guard;
pub mod literal;

pub use error::{RegisterError, RegisterResult};
pub use storage::window::RegisterWindow;
pub use types::address::AddressDescriptor;
pub use types::width::Width;

#[cfg(test)]
pub mod tests;
