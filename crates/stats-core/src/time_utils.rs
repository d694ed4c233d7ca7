use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

// ── System timezone detection ─────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

// ── DayMapper ─────────────────────────────────────────────────────────────────

/// Maps UTC instants to local calendar days, the aggregation key.
#[derive(Debug, Clone, Copy)]
pub struct DayMapper {
    tz: Tz,
}

impl DayMapper {
    /// Create a mapper for the given IANA timezone name.
    ///
    /// If `tz_name` is not a recognised IANA timezone, falls back to UTC
    /// and logs a warning.
    pub fn new(tz_name: &str) -> Self {
        let tz = tz_name.parse::<Tz>().unwrap_or_else(|_| {
            warn!("unrecognised timezone {tz_name:?}, falling back to UTC");
            Tz::UTC
        });
        Self { tz }
    }

    /// Resolve the `--timezone` setting: `"auto"` means the system
    /// timezone, anything else is an IANA name.
    pub fn from_setting(tz_setting: &str) -> Self {
        if tz_setting == "auto" {
            Self::new(&get_system_timezone())
        } else {
            Self::new(tz_setting)
        }
    }

    /// Calendar date of `instant` in the mapper's timezone.
    pub fn day(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
