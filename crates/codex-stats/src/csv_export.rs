//! CSV export of the aggregated rows.

use std::io::Write;
use std::path::Path;

use stats_core::error::Result;
use stats_core::models::ReportRow;

const HEADER: &str = "date,user_msgs,assistant_msgs,prompt_tokens,completion_tokens,total_tokens";

/// Write `rows` to `path` as CSV: raw integers, no thousands separators,
/// no Sum row. Parent directories are created as needed; with zero rows
/// the file contains only the header.
pub fn write_csv(path: &Path, rows: &[ReportRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    writeln!(file, "{HEADER}")?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{},{},{}",
            row.day,
            row.totals.user_msgs,
            row.totals.assistant_msgs,
            row.totals.prompt_tokens,
            row.totals.completion_tokens,
            row.totals.total_tokens,
        )?;
    }
    file.flush()?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
