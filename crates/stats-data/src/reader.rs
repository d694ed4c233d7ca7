//! Record extraction from heterogeneous history files.
//!
//! `.jsonl` files yield one record per parseable line; `.json` files are
//! unpacked as an array of objects, as list-valued container fields, or as
//! a single flat record when marker fields are present. Extraction never
//! fails: anything unreadable or unparseable yields nothing and a log
//! line.

use std::io::BufRead;
use std::path::Path;

use serde_json::Value;
use stats_core::error::{Result, StatsError};
use tracing::{debug, warn};

/// Object fields whose array elements are unpacked as nested records.
const CONTAINER_FIELDS: &[&str] = &["records", "events", "history", "lines", "items"];

/// Fields whose presence marks a top-level `.json` object as itself being
/// a record.
const MARKER_FIELDS: &[&str] = &[
    "text",
    "prompt",
    "response",
    "completion",
    "usage",
    "created",
    "ts",
    "timestamp",
    "choices",
    "messages",
];

/// Extract all records from `path`, swallowing any I/O or parse failure
/// for the file as a whole. A file that yields zero usable records is
/// indistinguishable, downstream, from a file that does not exist.
pub fn extract_records(path: &Path) -> Vec<Value> {
    match read_records(path) {
        Ok(records) => records,
        Err(e) => {
            warn!("skipping {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

fn read_records(path: &Path) -> Result<Vec<Value>> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("jsonl") => read_jsonl(path),
        Some("json") => read_json(path),
        _ => Ok(Vec::new()),
    }
}

/// One JSON value per non-blank line; lines that fail to parse are
/// skipped without aborting the file.
fn read_jsonl(path: &Path) -> Result<Vec<Value>> {
    let file = std::fs::File::open(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = std::io::BufReader::new(file);

    let mut records = Vec::new();
    let mut skipped = 0u64;
    for line_result in reader.lines() {
        let line = match line_result {
            Ok(l) => l,
            Err(_) => continue,
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => records.push(value),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!("{}: skipped {} malformed lines", path.display(), skipped);
    }
    Ok(records)
}

/// Whole-document parse. Arrays yield their object elements; objects
/// yield the object elements of any container field, plus the top-level
/// object itself when it carries a marker field. A container that is also
/// a flat record is deliberately yielded twice, matching the original
/// tool's behavior.
fn read_json(path: &Path) -> Result<Vec<Value>> {
    let text = std::fs::read_to_string(path).map_err(|source| StatsError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Value = serde_json::from_str(&text)?;

    let mut records = Vec::new();
    match doc {
        Value::Array(items) => {
            records.extend(items.into_iter().filter(|v| v.is_object()));
        }
        Value::Object(map) => {
            for &field in CONTAINER_FIELDS {
                if let Some(Value::Array(items)) = map.get(field) {
                    records.extend(items.iter().filter(|v| v.is_object()).cloned());
                }
            }
            if MARKER_FIELDS.iter().any(|f| map.contains_key(*f)) {
                records.push(Value::Object(map));
            }
        }
        _ => {}
    }
    Ok(records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
