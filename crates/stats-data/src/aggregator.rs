//! Daily bucketing of interpreted events.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use stats_core::models::{DailyTotals, InterpretedEvent, ReportRow};

/// Accumulates interpreted events into per-day buckets, applying the
/// optional inclusive date range before bucketing. Buckets are keyed by
/// calendar day, so iteration is already sorted ascending.
#[derive(Debug, Default)]
pub struct DailyAggregator {
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
    buckets: BTreeMap<NaiveDate, DailyTotals>,
}

impl DailyAggregator {
    pub fn new(since: Option<NaiveDate>, until: Option<NaiveDate>) -> Self {
        Self {
            since,
            until,
            buckets: BTreeMap::new(),
        }
    }

    /// Add one event. Events whose day falls outside the configured range
    /// are discarded and never touch any bucket.
    pub fn add(&mut self, event: &InterpretedEvent) {
        if self.since.is_some_and(|bound| event.day < bound) {
            return;
        }
        if self.until.is_some_and(|bound| event.day > bound) {
            return;
        }
        self.buckets.entry(event.day).or_default().add_event(event);
    }

    /// Rows sorted by day ascending.
    pub fn rows(&self) -> Vec<ReportRow> {
        self.buckets
            .iter()
            .map(|(day, totals)| ReportRow {
                day: *day,
                totals: *totals,
            })
            .collect()
    }

    /// Column-wise sum across all buckets (the report's trailing Sum row).
    pub fn totals(&self) -> DailyTotals {
        let mut sum = DailyTotals::default();
        for totals in self.buckets.values() {
            sum.add_totals(totals);
        }
        sum
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
