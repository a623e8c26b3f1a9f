use anyhow::Context;
use std::path::Path;
use vreg_kernel::{AddressDescriptor, RegisterWindow};
use vreg_persistence::read_image;

/// Loads a strictly-sized image as a window.
pub fn load_window(path: &Path) -> anyhow::Result<RegisterWindow> {
    let bytes = read_image(path).with_context(|| format!("reading {}", path.display()))?;
    RegisterWindow::from_image(bytes).context("image has the wrong length")
}

pub fn run(path: &Path, addr: u64, width: u64) -> anyhow::Result<u64> {
    let window = load_window(path)?;
    let desc = AddressDescriptor::new(addr, width)?;
    let value = window.read(&desc);
    println!("[{:#x}] (width {}) = {:#x}", addr, width, value);
    Ok(value)
}
