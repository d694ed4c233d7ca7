use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Aggregate Codex CLI usage logs into per-day statistics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "codex-stats",
    about = "Aggregate Codex CLI usage logs into per-day statistics",
    version
)]
pub struct Settings {
    /// Directory to scan (defaults to ~/.codex)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Write the aggregated rows to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Inclusive lower bound on local day (YYYY-MM-DD)
    #[arg(long)]
    pub since: Option<NaiveDate>,

    /// Inclusive upper bound on local day (YYYY-MM-DD)
    #[arg(long)]
    pub until: Option<NaiveDate>,

    /// IANA timezone used for day bucketing (auto-detected if not specified)
    #[arg(long, default_value = "auto")]
    pub timezone: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}
