//! Candidate log-file discovery.
//!
//! Scans the root directory for the fixed history-file names and `*.jsonl`
//! / `*.json` globs, then recurses into the well-known session
//! subdirectories.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use stats_core::error::{Result, StatsError};
use tracing::debug;

/// File names probed directly under the root before the glob groups.
const FIXED_NAMES: &[&str] = &["history.jsonl", "history.json"];

/// Subdirectories scanned recursively when present under the root.
const SESSION_SUBDIRS: &[&str] = &["sessions", "log", "logs"];

/// Find candidate log files under `root`.
///
/// Matches, in order: `history.jsonl`, `history.json`, `*.jsonl` and
/// `*.json` directly under the root (each glob group sorted by path),
/// then `*.jsonl` and `*.json` recursively under any `sessions`, `log`
/// or `logs` subdirectory. The result is de-duplicated by path,
/// preserving first-seen order.
///
/// Fails with [`StatsError::PathNotFound`] when `root` does not exist.
pub fn find_log_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(StatsError::PathNotFound(root.to_path_buf()));
    }

    let mut candidates: Vec<PathBuf> = Vec::new();

    for name in FIXED_NAMES {
        let path = root.join(name);
        if path.is_file() {
            candidates.push(path);
        }
    }
    candidates.extend(files_with_extension(root, "jsonl"));
    candidates.extend(files_with_extension(root, "json"));

    for sub in SESSION_SUBDIRS {
        let dir = root.join(sub);
        if dir.exists() {
            candidates.extend(walk_with_extension(&dir, "jsonl"));
            candidates.extend(walk_with_extension(&dir, "json"));
        }
    }

    let mut seen: HashSet<PathBuf> = HashSet::new();
    let files: Vec<PathBuf> = candidates
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect();

    debug!(
        "discovered {} candidate files under {}",
        files.len(),
        root.display()
    );
    Ok(files)
}

/// Non-recursive `*.{ext}` listing directly under `dir`, sorted by path.
fn files_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().map(|e| e == ext).unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

/// Recursive `*.{ext}` walk under `dir`, sorted by path.
fn walk_with_extension(dir: &Path, ext: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().map(|e| e == ext).unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "{}\n").unwrap();
        path
    }

    #[test]
    fn test_nonexistent_root_is_an_error() {
        let result = find_log_files(Path::new("/tmp/does-not-exist-codex-stats-test"));
        assert!(matches!(result, Err(StatsError::PathNotFound(_))));
    }

    #[test]
    fn test_empty_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(find_log_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_history_files_come_first_and_are_not_duplicated() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.jsonl");
        touch(dir.path(), "history.jsonl");
        touch(dir.path(), "history.json");

        let files = find_log_files(dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        // history.jsonl also matches the *.jsonl glob; dedup keeps the
        // first occurrence only.
        assert_eq!(names, vec!["history.jsonl", "history.json", "a.jsonl"]);
    }

    #[test]
    fn test_glob_groups_are_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "c.jsonl");
        touch(dir.path(), "a.jsonl");
        touch(dir.path(), "b.json");

        let files = find_log_files(dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["a.jsonl", "c.jsonl", "b.json"]);
    }

    #[test]
    fn test_other_extensions_ignored() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "history.jsonl.bak");

        assert!(find_log_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_session_subdirs_scanned_recursively() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("sessions").join("2024").join("01");
        std::fs::create_dir_all(&nested).unwrap();
        touch(&nested, "rollout.jsonl");
        let logs = dir.path().join("logs");
        std::fs::create_dir_all(&logs).unwrap();
        touch(&logs, "events.json");

        let files = find_log_files(dir.path()).unwrap();
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();

        assert_eq!(names, vec!["rollout.jsonl", "events.json"]);
    }

    #[test]
    fn test_unrelated_subdirs_not_scanned() {
        let dir = TempDir::new().unwrap();
        let other = dir.path().join("archive");
        std::fs::create_dir_all(&other).unwrap();
        touch(&other, "old.jsonl");

        assert!(find_log_files(dir.path()).unwrap().is_empty());
    }
}
