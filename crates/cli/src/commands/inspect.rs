use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use std::path::Path;
use vreg_kernel::config::{BASE, END, SIZE};
use vreg_persistence::{image_digest, read_image, PersistenceError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageState {
    Ok { non_zero_bytes: usize, digest: u64 },
    SizeMismatch { found: usize },
    Missing,
    Unreadable(String),
}

pub fn report(path: &Path) -> ImageState {
    match read_image(path) {
        Ok(bytes) => ImageState::Ok {
            non_zero_bytes: bytes.iter().filter(|b| **b != 0).count(),
            digest: image_digest(&bytes),
        },
        Err(PersistenceError::SizeMismatch { found, .. }) => ImageState::SizeMismatch { found },
        Err(PersistenceError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            ImageState::Missing
        }
        Err(e) => ImageState::Unreadable(e.to_string()),
    }
}

pub fn run(path: &Path) -> anyhow::Result<ImageState> {
    let state = report(path);

    println!("\nRegister Image Report");
    println!("---------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Path".to_string(), path.display().to_string()]);
    table.add_row(vec!["Window".to_string(), format!("{:#x}..={:#x}", BASE, END)]);

    match &state {
        ImageState::Ok { non_zero_bytes, digest } => {
            table.add_row(vec!["Status".to_string(), "OK".to_string()]);
            table.add_row(vec!["Size".to_string(), format!("{} bytes", SIZE)]);
            table.add_row(vec!["Non-zero bytes".to_string(), non_zero_bytes.to_string()]);
            table.add_row(vec!["CRC-64".to_string(), format!("{:016x}", digest)]);
        }
        ImageState::SizeMismatch { found } => {
            table.add_row(vec!["Status".to_string(), "SIZE MISMATCH".to_string()]);
            table.add_row(vec![
                "Size".to_string(),
                format!("{} bytes (expected {}); node would start zeroed", found, SIZE),
            ]);
        }
        ImageState::Missing => {
            table.add_row(vec!["Status".to_string(), "MISSING".to_string()]);
        }
        ImageState::Unreadable(reason) => {
            table.add_row(vec!["Status".to_string(), "UNREADABLE".to_string()]);
            table.add_row(vec!["Error".to_string(), reason.clone()]);
        }
    }

    println!("{}", table);
    Ok(state)
}
