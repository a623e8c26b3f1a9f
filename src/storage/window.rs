// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The register window: a fixed `SIZE`-byte buffer mapped at `BASE`.

use byteorder::{ByteOrder, LittleEndian};

use crate::config::SIZE;
use crate::error::{RegisterError, RegisterResult};
use crate::types::address::AddressDescriptor;

/// Backing bytes for addresses `BASE..=END`.
///
/// The buffer length is fixed at construction and never changes. All access
/// goes through an [`AddressDescriptor`], so offsets are always in bounds.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterWindow {
    bytes: Box<[u8]>,
}

impl RegisterWindow {
    /// All-zero window.
    pub fn new() -> Self {
        Self {
            bytes: vec![0u8; SIZE].into_boxed_slice(),
        }
    }

    /// Rebuilds a window from a persisted image. Returns `None` unless the
    /// image is exactly `SIZE` bytes.
    pub fn from_image(image: Vec<u8>) -> Option<Self> {
        if image.len() != SIZE {
            return None;
        }
        Some(Self {
            bytes: image.into_boxed_slice(),
        })
    }

    /// Little-endian unsigned value stored at `desc`.
    pub fn read(&self, desc: &AddressDescriptor) -> u64 {
        LittleEndian::read_uint(self.raw_slice(desc), desc.width().bytes())
    }

    pub fn raw_slice(&self, desc: &AddressDescriptor) -> &[u8] {
        &self.bytes[desc.span()]
    }

    /// Stores `value` little-endian in exactly `desc.width()` bytes.
    ///
    /// Does not consult the write-once guard; callers check it first.
    pub fn write(&mut self, desc: &AddressDescriptor, value: u64) -> RegisterResult<()> {
        let width = desc.width();
        if !width.fits(value) {
            return Err(RegisterError::ValueOverflow {
                value: value as i128,
                width: width.as_u64(),
            });
        }
        LittleEndian::write_uint(&mut self.bytes[desc.span()], value, width.bytes());
        Ok(())
    }

    pub fn clear(&mut self, desc: &AddressDescriptor) {
        self.bytes[desc.span()].fill(0);
    }

    pub fn clear_all(&mut self) {
        self.bytes.fill(0);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn non_zero_bytes(&self) -> usize {
        self.bytes.iter().filter(|b| **b != 0).count()
    }

    /// Captures the current bytes under `targets` so a mutation can be undone.
    pub fn checkpoint<'a, I>(&self, targets: I) -> Checkpoint
    where
        I: IntoIterator<Item = &'a AddressDescriptor>,
    {
        let spans = targets
            .into_iter()
            .map(|desc| (*desc, self.raw_slice(desc).to_vec()))
            .collect();
        Checkpoint::Spans(spans)
    }

    pub fn checkpoint_all(&self) -> Checkpoint {
        Checkpoint::Full(self.bytes.clone())
    }

    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        match checkpoint {
            Checkpoint::Spans(spans) => {
                for (desc, saved) in spans {
                    self.bytes[desc.span()].copy_from_slice(&saved);
                }
            }
            Checkpoint::Full(image) => self.bytes = image,
        }
    }
}

/// Bytes captured before a mutation; see [`RegisterWindow::rollback`].
#[derive(Debug, Clone)]
pub enum Checkpoint {
    Spans(Vec<(AddressDescriptor, Vec<u8>)>),
    Full(Box<[u8]>),
}

impl Default for RegisterWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for RegisterWindow {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegisterWindow")
            .field("len", &self.bytes.len())
            .field("non_zero_bytes", &self.non_zero_bytes())
            .finish()
    }
}
