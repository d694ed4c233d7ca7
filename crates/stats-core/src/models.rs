use chrono::NaiveDate;

// ── Role ──────────────────────────────────────────────────────────────────────

/// Speaker role inferred for a single log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Unknown => "unknown",
        }
    }
}

// ── InterpretedEvent ──────────────────────────────────────────────────────────

/// One log record after interpretation: the local calendar day it belongs
/// to, the inferred speaker role, and its token usage. Immutable once
/// created; consumed directly by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpretedEvent {
    pub day: NaiveDate,
    pub role: Role,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

// ── DailyTotals ───────────────────────────────────────────────────────────────

/// Per-day accumulator. All counters start at zero and are only ever
/// incremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailyTotals {
    pub user_msgs: u64,
    pub assistant_msgs: u64,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl DailyTotals {
    /// Add a single event's counts to the running totals. Events with an
    /// unknown role contribute tokens but no message count.
    pub fn add_event(&mut self, event: &InterpretedEvent) {
        match event.role {
            Role::User => self.user_msgs += 1,
            Role::Assistant => self.assistant_msgs += 1,
            Role::Unknown => {}
        }
        self.prompt_tokens += event.prompt_tokens;
        self.completion_tokens += event.completion_tokens;
        self.total_tokens += event.total_tokens;
    }

    /// Column-wise addition of another day's totals (used for the Sum row).
    pub fn add_totals(&mut self, other: &DailyTotals) {
        self.user_msgs += other.user_msgs;
        self.assistant_msgs += other.assistant_msgs;
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

// ── ReportRow ─────────────────────────────────────────────────────────────────

/// A day plus its final counter values, ready for rendering. Immutable
/// once emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRow {
    pub day: NaiveDate,
    pub totals: DailyTotals,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
