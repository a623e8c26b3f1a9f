use anyhow::bail;
use std::path::Path;
use vreg_kernel::RegisterWindow;
use vreg_persistence::write_image_atomic;

/// Replaces the image with an all-zero one.
pub fn run(path: &Path, confirm: bool) -> anyhow::Result<()> {
    if !confirm {
        bail!("refusing to reset {} without --confirm", path.display());
    }
    write_image_atomic(path, RegisterWindow::new().as_bytes())?;
    println!("Reset {} to an all-zero image", path.display());
    Ok(())
}
