use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use std::path::Path;
use vreg_kernel::range::RangeRequest;

use super::read::load_window;

/// Prints the registers in the range. Zero registers are skipped unless
/// `all` is set. Returns the rows that were printed.
pub fn run(
    path: &Path,
    start: u64,
    end: Option<u64>,
    count: Option<i64>,
    width: u64,
    all: bool,
) -> anyhow::Result<Vec<(u64, u64)>> {
    let window = load_window(path)?;
    let targets = RangeRequest::from_parts(start, end, count, width)?.expand()?;

    let rows: Vec<(u64, u64)> = targets
        .iter()
        .map(|desc| (desc.address(), window.read(desc)))
        .filter(|(_, value)| all || *value != 0)
        .collect();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Address", "Value"]);
    for (addr, value) in &rows {
        let digits = width as usize * 2;
        table.add_row(vec![format!("{:#x}", addr), format!("0x{:0digits$x}", value)]);
    }

    println!("{}", table);
    println!("{} of {} registers shown", rows.len(), targets.len());
    Ok(rows)
}
