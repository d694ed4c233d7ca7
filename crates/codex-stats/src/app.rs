//! The single-pass aggregation pipeline: discovery → extraction →
//! interpretation → aggregation. Files are processed strictly
//! sequentially in discovery order; records in file order.

use std::path::Path;

use chrono::{DateTime, Utc};
use stats_core::data_processors::RecordInterpreter;
use stats_core::error::Result;
use stats_core::models::{DailyTotals, ReportRow};
use stats_core::settings::Settings;
use stats_core::time_utils::DayMapper;
use stats_data::aggregator::DailyAggregator;
use stats_data::{discovery, reader};
use tracing::debug;

/// The aggregated report: sorted daily rows plus the column-wise totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub rows: Vec<ReportRow>,
    pub totals: DailyTotals,
}

/// Run the full pipeline over `root`.
///
/// Fails only when `root` does not exist; every per-file or per-record
/// problem degrades to defaults and is at most logged.
pub fn build_report(root: &Path, settings: &Settings) -> Result<Report> {
    let files = discovery::find_log_files(root)?;

    let interpreter = RecordInterpreter::new(DayMapper::from_setting(&settings.timezone));
    let mut aggregator = DailyAggregator::new(settings.since, settings.until);

    for path in &files {
        let fallback = file_mtime(path);
        let records = reader::extract_records(path);
        debug!("{}: {} records", path.display(), records.len());
        for record in &records {
            let event = interpreter.interpret(record, fallback);
            aggregator.add(&event);
        }
    }

    Ok(Report {
        rows: aggregator.rows(),
        totals: aggregator.totals(),
    })
}

/// Last-modified time of `path`, or the current instant when the
/// metadata cannot be read.
fn file_mtime(path: &Path) -> DateTime<Utc> {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
