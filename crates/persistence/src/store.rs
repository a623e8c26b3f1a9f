//! Image stores: where a register window is loaded from and saved to.

use crate::error::{PersistenceError, Result};
use crate::image::{read_image, write_image_atomic};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use vreg_kernel::RegisterWindow;

/// Why `load` produced the window it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The stored image was used as-is.
    Loaded,
    /// Nothing stored yet; window is zeroed.
    Missing,
    /// Stored image had the wrong length; window is zeroed.
    SizeMismatch { found: usize },
    /// Stored image could not be read; window is zeroed.
    Unreadable(String),
}

#[derive(Debug)]
pub struct LoadedWindow {
    pub window: RegisterWindow,
    pub status: LoadStatus,
}

impl LoadedWindow {
    fn zeroed(status: LoadStatus) -> Self {
        Self {
            window: RegisterWindow::new(),
            status,
        }
    }
}

pub trait ImageStore: Send + Sync {
    /// Never fails: anything other than a well-formed image yields a zeroed
    /// window, with the reason in `status`.
    fn load(&self) -> LoadedWindow;

    /// Persists the full window. Must be all-or-nothing from a reader's view.
    fn save(&self, window: &RegisterWindow) -> Result<()>;

    /// Whether saved images survive a process restart.
    fn is_durable(&self) -> bool;

    fn describe(&self) -> String;
}

/// File-backed store using the atomic replace protocol.
#[derive(Debug, Clone)]
pub struct FileImageStore {
    path: PathBuf,
}

impl FileImageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageStore for FileImageStore {
    fn load(&self) -> LoadedWindow {
        match read_image(&self.path) {
            Ok(bytes) => match RegisterWindow::from_image(bytes) {
                Some(window) => LoadedWindow {
                    window,
                    status: LoadStatus::Loaded,
                },
                None => LoadedWindow::zeroed(LoadStatus::Unreadable("image length changed".into())),
            },
            Err(PersistenceError::SizeMismatch { found, .. }) => {
                LoadedWindow::zeroed(LoadStatus::SizeMismatch { found })
            }
            Err(PersistenceError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
                LoadedWindow::zeroed(LoadStatus::Missing)
            }
            Err(e) => LoadedWindow::zeroed(LoadStatus::Unreadable(e.to_string())),
        }
    }

    fn save(&self, window: &RegisterWindow) -> Result<()> {
        write_image_atomic(&self.path, window.as_bytes())
    }

    fn is_durable(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    image: Mutex<Option<Vec<u8>>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

/// Process-local store. Clones share the same image, so a test can keep a
/// handle after moving one into an engine.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    inner: Arc<MemoryInner>,
}

impl MemoryImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `image` (any length; `load` validates it).
    pub fn with_image(image: Vec<u8>) -> Self {
        let store = Self::new();
        if let Ok(mut slot) = store.inner.image.lock() {
            *slot = Some(image);
        }
        store
    }

    /// Makes subsequent saves fail with an I/O error, simulating a full disk.
    pub fn set_fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }

    pub fn image(&self) -> Option<Vec<u8>> {
        self.inner.image.lock().ok().and_then(|slot| slot.clone())
    }
}

impl ImageStore for MemoryImageStore {
    fn load(&self) -> LoadedWindow {
        match self.image() {
            None => LoadedWindow::zeroed(LoadStatus::Missing),
            Some(bytes) => {
                let found = bytes.len();
                match RegisterWindow::from_image(bytes) {
                    Some(window) => LoadedWindow {
                        window,
                        status: LoadStatus::Loaded,
                    },
                    None => LoadedWindow::zeroed(LoadStatus::SizeMismatch { found }),
                }
            }
        }
    }

    fn save(&self, window: &RegisterWindow) -> Result<()> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::Other, "simulated storage failure").into());
        }
        let mut slot = self
            .inner
            .image
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "image lock poisoned"))?;
        *slot = Some(window.as_bytes().to_vec());
        self.inner.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use vreg_kernel::config::{BASE, SIZE};
    use vreg_kernel::AddressDescriptor;

    fn dirty_window() -> RegisterWindow {
        let mut window = RegisterWindow::new();
        window
            .write(&AddressDescriptor::new(BASE + 0x10, 4).unwrap(), 0xDEAD_BEEF)
            .unwrap();
        window
            .write(&AddressDescriptor::new(BASE + SIZE as u64 - 8, 8).unwrap(), u64::MAX)
            .unwrap();
        window
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path().join("vreg.bin"));

        let window = dirty_window();
        store.save(&window).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.status, LoadStatus::Loaded);
        assert_eq!(loaded.window.as_bytes(), window.as_bytes());
    }

    #[test]
    fn test_file_store_missing_is_zeroed() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path().join("absent.bin"));

        let loaded = store.load();
        assert_eq!(loaded.status, LoadStatus::Missing);
        assert_eq!(loaded.window.non_zero_bytes(), 0);
    }

    #[test]
    fn test_file_store_wrong_length_is_zeroed_not_overlaid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vreg.bin");
        fs::write(&path, vec![0xFFu8; SIZE - 1]).unwrap();

        let loaded = FileImageStore::new(&path).load();
        assert_eq!(loaded.status, LoadStatus::SizeMismatch { found: SIZE - 1 });
        assert_eq!(loaded.window.len(), SIZE);
        assert_eq!(loaded.window.non_zero_bytes(), 0);
    }

    #[test]
    fn test_file_store_unwritable_location_errors() {
        let dir = tempdir().unwrap();
        let store = FileImageStore::new(dir.path().join("no-such-dir").join("vreg.bin"));
        assert!(matches!(
            store.save(&RegisterWindow::new()),
            Err(PersistenceError::IoError(_))
        ));
    }

    #[test]
    fn test_memory_store_shares_state_and_fails_on_demand() {
        let store = MemoryImageStore::new();
        let handle = store.clone();

        store.save(&dirty_window()).unwrap();
        assert_eq!(handle.save_count(), 1);
        assert_eq!(handle.load().status, LoadStatus::Loaded);

        handle.set_fail_saves(true);
        assert!(store.save(&RegisterWindow::new()).is_err());
        assert_eq!(handle.save_count(), 1);
        // Failed save leaves the previous image in place.
        assert_eq!(handle.load().window.as_bytes(), dirty_window().as_bytes());
    }

    #[test]
    fn test_memory_store_seeded_with_bad_image() {
        let store = MemoryImageStore::with_image(vec![1, 2, 3]);
        let loaded = store.load();
        assert_eq!(loaded.status, LoadStatus::SizeMismatch { found: 3 });
        assert_eq!(loaded.window.non_zero_bytes(), 0);
    }
}
