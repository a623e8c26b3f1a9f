// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Address-space constants.

/// First address of the register window.
pub const BASE: u64 = 0x8000_0000;

/// Window size in bytes.
pub const SIZE: usize = 0x1_0000;

/// Last valid address of the window (inclusive).
pub const END: u64 = BASE + SIZE as u64 - 1;

/// Access width used by the transports when a request omits one.
pub const DEFAULT_WIDTH: u64 = 4;
