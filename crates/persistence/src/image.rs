//! Raw image files.
//!
//! An image is exactly `SIZE` bytes with byte `i` holding address `BASE + i`.
//! There is no header; the length is the only integrity check.

use crate::error::{PersistenceError, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use vreg_kernel::config::SIZE;

/// Sibling path used while an image is being replaced: `<path>.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Writes `bytes` to `path` so that readers only ever see the old or the new
/// complete file: write to the temp sibling, fsync, rename over the target.
pub fn write_image_atomic(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = temp_path(path);

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.flush()?;
        file.sync_all()?;
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    sync_parent(path)?;
    Ok(())
}

#[cfg(unix)]
fn sync_parent(path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    File::open(parent)?.sync_all()?;
    Ok(())
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> Result<()> {
    Ok(())
}

/// Strict read: errors if the file is missing or not exactly `SIZE` bytes.
pub fn read_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let data = fs::read(path)?;
    if data.len() != SIZE {
        return Err(PersistenceError::SizeMismatch {
            expected: SIZE,
            found: data.len(),
        });
    }
    Ok(data)
}

/// CRC-64 of an image, for status and inspection output.
pub fn image_digest(bytes: &[u8]) -> u64 {
    let mut digest = crc64fast::Digest::new();
    digest.write(bytes);
    digest.sum64()
}
