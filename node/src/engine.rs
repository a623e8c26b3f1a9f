// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Register engine: the operation surface the HTTP layer calls into.
//!
//! Every mutation follows the same sequence: resolve targets, check every
//! precondition, mutate the window, persist. If persisting fails the window
//! is rolled back, so memory never runs ahead of the stored image.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;
use vreg_kernel::config::SIZE;
use vreg_kernel::guard::WriteGuard;
use vreg_kernel::range::RangeRequest;
use vreg_kernel::storage::window::Checkpoint;
use vreg_kernel::{AddressDescriptor, RegisterError, RegisterWindow};
use vreg_persistence::{
    image_digest, FileImageStore, ImageStore, LoadStatus, LoadedWindow, MemoryImageStore,
};

use crate::config::NodeConfig;
use crate::errors::EngineError;

pub type SharedEngine = Arc<RwLock<RegisterEngine>>;

pub type EngineResult<T> = Result<T, EngineError>;

/// Source of values for a batch write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteValues {
    /// One value per resolved address, in address order.
    Each(Vec<i128>),
    /// The same value at every resolved address.
    Repeat(i128),
}

pub struct RegisterEngine {
    window: RegisterWindow,
    store: Box<dyn ImageStore>,
    load_status: LoadStatus,
}

impl RegisterEngine {
    pub fn new(cfg: &NodeConfig) -> Self {
        let store: Box<dyn ImageStore> = match &cfg.image_path {
            Some(path) => Box::new(FileImageStore::new(path)),
            None => {
                tracing::warn!("No image path configured; register state will not survive restart");
                Box::new(MemoryImageStore::new())
            }
        };
        Self::open(store)
    }

    /// Loads the window from `store`, falling back to all-zero.
    pub fn open(store: Box<dyn ImageStore>) -> Self {
        let LoadedWindow { window, status } = store.load();
        match &status {
            LoadStatus::Loaded => {
                tracing::info!("Loaded register image from {}", store.describe())
            }
            LoadStatus::Missing => {
                tracing::info!("No register image at {}; starting zeroed", store.describe())
            }
            LoadStatus::SizeMismatch { found } => tracing::warn!(
                "Register image at {} is {} bytes (expected {}); starting zeroed",
                store.describe(),
                found,
                SIZE
            ),
            LoadStatus::Unreadable(reason) => tracing::warn!(
                "Register image at {} unreadable ({}); starting zeroed",
                store.describe(),
                reason
            ),
        }
        Self {
            window,
            store,
            load_status: status,
        }
    }

    pub fn into_shared(self) -> SharedEngine {
        Arc::new(RwLock::new(self))
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load_status
    }

    pub fn window(&self) -> &RegisterWindow {
        &self.window
    }

    pub fn is_persistent(&self) -> bool {
        self.store.is_durable()
    }

    pub fn image_location(&self) -> String {
        self.store.describe()
    }

    pub fn digest(&self) -> u64 {
        image_digest(self.window.as_bytes())
    }

    // ---- reads ----

    pub fn read_one(&self, addr: u64, width: u64) -> EngineResult<u64> {
        let desc = AddressDescriptor::new(addr, width)?;
        metrics::counter!("vreg_reads_total", 1);
        Ok(self.window.read(&desc))
    }

    /// Ordered `(address, value)` pairs for the resolved range.
    pub fn read_many(&self, range: RangeRequest) -> EngineResult<Vec<(u64, u64)>> {
        let targets = range.expand()?;
        metrics::counter!("vreg_reads_total", targets.len() as u64);
        Ok(targets
            .iter()
            .map(|desc| (desc.address(), self.window.read(desc)))
            .collect())
    }

    // ---- writes ----

    pub fn write_one(&mut self, addr: u64, width: u64, value: i128) -> EngineResult<u64> {
        let desc = AddressDescriptor::new(addr, width)?;
        self.guard(std::slice::from_ref(&desc))?;
        let value = desc.width().narrow(value)?;

        let checkpoint = self.window.checkpoint([&desc]);
        self.window.write(&desc, value)?;
        self.commit(checkpoint)?;

        metrics::counter!("vreg_writes_total", 1);
        tracing::debug!("Wrote {:#x} to {:#x} (width {})", value, addr, width);
        Ok(value)
    }

    /// Writes `count` registers from `start`. Either every register is written
    /// and persisted, or none is.
    pub fn write_many(
        &mut self,
        start: u64,
        count: i64,
        width: u64,
        values: Option<WriteValues>,
    ) -> EngineResult<Vec<(u64, u64)>> {
        let targets = RangeRequest::Counted { start, count, width }.expand()?;

        let raw: Vec<i128> = match values {
            Some(WriteValues::Each(list)) => {
                if list.len() != targets.len() {
                    return Err(RegisterError::ValuesLengthMismatch {
                        expected: targets.len(),
                        found: list.len(),
                    }
                    .into());
                }
                list
            }
            Some(WriteValues::Repeat(v)) => vec![v; targets.len()],
            None => return Err(RegisterError::MissingValues.into()),
        };

        self.guard(&targets)?;

        let planned = targets
            .iter()
            .zip(raw)
            .map(|(desc, v)| Ok((*desc, desc.width().narrow(v)?)))
            .collect::<Result<Vec<_>, RegisterError>>()?;

        let checkpoint = self.window.checkpoint(&targets);
        for (desc, value) in &planned {
            self.window.write(desc, *value)?;
        }
        self.commit(checkpoint)?;

        metrics::counter!("vreg_writes_total", planned.len() as u64);
        tracing::debug!("Batch wrote {} registers from {:#x}", planned.len(), start);
        Ok(planned
            .into_iter()
            .map(|(desc, value)| (desc.address(), value))
            .collect())
    }

    // ---- clears ----

    pub fn clear_one(&mut self, addr: u64, width: u64) -> EngineResult<()> {
        let desc = AddressDescriptor::new(addr, width)?;
        let checkpoint = self.window.checkpoint([&desc]);
        self.window.clear(&desc);
        self.commit(checkpoint)?;

        metrics::counter!("vreg_clears_total", 1);
        tracing::debug!("Cleared {:#x} (width {})", addr, width);
        Ok(())
    }

    /// Zeroes `start..=end`; returns the number of registers cleared.
    pub fn clear_range(&mut self, start: u64, end: u64, width: u64) -> EngineResult<usize> {
        let targets = RangeRequest::Bounded { start, end, width }.expand()?;
        let checkpoint = self.window.checkpoint(&targets);
        for desc in &targets {
            self.window.clear(desc);
        }
        self.commit(checkpoint)?;

        metrics::counter!("vreg_clears_total", targets.len() as u64);
        tracing::debug!("Cleared {} registers in {:#x}..={:#x}", targets.len(), start, end);
        Ok(targets.len())
    }

    pub fn clear_all(&mut self, confirm: bool) -> EngineResult<()> {
        if !confirm {
            return Err(RegisterError::ConfirmationRequired.into());
        }
        let checkpoint = self.window.checkpoint_all();
        self.window.clear_all();
        self.commit(checkpoint)?;

        metrics::counter!("vreg_clears_total", 1);
        tracing::info!("Cleared entire register window");
        Ok(())
    }

    /// Writes the current window to the store outside of any mutation.
    pub fn persist(&self) -> EngineResult<()> {
        self.store.save(&self.window)?;
        Ok(())
    }

    fn guard(&self, targets: &[AddressDescriptor]) -> EngineResult<()> {
        WriteGuard::check_writable(&self.window, targets).map_err(|e| {
            metrics::counter!("vreg_write_conflicts_total", 1);
            EngineError::from(e)
        })
    }

    fn commit(&mut self, checkpoint: Checkpoint) -> EngineResult<()> {
        let start = Instant::now();
        let res = self.store.save(&self.window);
        metrics::histogram!("vreg_persist_duration_seconds", start.elapsed().as_secs_f64());

        if let Err(e) = res {
            tracing::error!("Persist to {} failed, rolling back: {}", self.store.describe(), e);
            self.window.rollback(checkpoint);
            return Err(e.into());
        }
        Ok(())
    }
}
