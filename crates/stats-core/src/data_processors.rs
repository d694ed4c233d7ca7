use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use crate::models::{InterpretedEvent, Role};
use crate::time_utils::DayMapper;

// ── TimestampResolver ─────────────────────────────────────────────────────────

/// Numeric fields interpreted as Unix epoch seconds, in priority order.
const EPOCH_FIELDS: &[&str] = &["ts", "created", "time", "t"];

/// String fields parsed as ISO 8601 or one of [`NAIVE_FORMATS`], in
/// priority order.
const STRING_FIELDS: &[&str] = &["timestamp", "date", "datetime", "created_at"];

/// Fallback patterns for strings that carry no zone offset; parsed
/// results are treated as UTC. Date-only matches resolve to midnight.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%a, %d %b %Y %H:%M:%S %Z",
];

/// Resolves the instant a record describes from the variety of timestamp
/// shapes found in history files.
pub struct TimestampResolver;

impl TimestampResolver {
    /// Resolve a record's timestamp, normalized to UTC.
    ///
    /// Resolution order, first success wins:
    /// 1. numeric epoch-seconds fields (fractional allowed),
    /// 2. string fields parsed as ISO 8601 / the fallback patterns,
    /// 3. `fallback` — the containing file's last-modified time.
    ///
    /// A field whose type does not match the expected kind for its step is
    /// ignored, falling through to the next candidate.
    pub fn resolve(record: &Value, fallback: DateTime<Utc>) -> DateTime<Utc> {
        for &key in EPOCH_FIELDS {
            if let Some(secs) = record.get(key).and_then(Value::as_f64) {
                if let Some(dt) = Self::from_epoch(secs) {
                    return dt;
                }
            }
        }

        for &key in STRING_FIELDS {
            if let Some(s) = record.get(key).and_then(Value::as_str) {
                if let Some(dt) = Self::parse_str(s) {
                    return dt;
                }
            }
        }

        fallback
    }

    fn from_epoch(secs: f64) -> Option<DateTime<Utc>> {
        let whole = secs.trunc() as i64;
        let nanos = (secs.fract().abs() * 1_000_000_000.0).round() as u32;
        DateTime::from_timestamp(whole, nanos)
    }

    fn parse_str(s: &str) -> Option<DateTime<Utc>> {
        if s.is_empty() {
            return None;
        }

        // Replace a trailing 'Z' with '+00:00' for RFC 3339 compatibility.
        let normalised = match s.strip_suffix('Z') {
            Some(stripped) => format!("{stripped}+00:00"),
            None => s.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(&normalised) {
            return Some(dt.with_timezone(&Utc));
        }

        for fmt in NAIVE_FORMATS {
            if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
            // date-only patterns use NaiveDate.
            if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
                let naive = date.and_hms_opt(0, 0, 0)?;
                return Some(Utc.from_utc_datetime(&naive));
            }
        }

        debug!("could not parse timestamp string {s:?}");
        None
    }
}

// ── RoleClassifier ────────────────────────────────────────────────────────────

/// A single classification rule: returns `Some(role)` on match, `None` to
/// let the cascade continue.
pub type RoleRule = (&'static str, fn(&Value) -> Option<Role>);

/// The classification cascade, evaluated in order, first match wins.
/// Kept as a data-driven table so tests can enumerate it.
pub const ROLE_RULES: &[RoleRule] = &[
    ("explicit-role", rule_explicit_role),
    ("last-message-role", rule_last_message_role),
    ("prompt-with-reply", rule_prompt_with_reply),
    ("bare-text", rule_bare_text),
    ("reply-fields", rule_reply_fields),
    ("event-type-name", rule_event_type_name),
];

/// Classifies a record as user, assistant, or unknown.
pub struct RoleClassifier;

impl RoleClassifier {
    pub fn classify(record: &Value) -> Role {
        for (_, rule) in ROLE_RULES {
            if let Some(role) = rule(record) {
                return role;
            }
        }
        Role::Unknown
    }
}

fn role_from_str(s: &str) -> Option<Role> {
    match s {
        "user" => Some(Role::User),
        "assistant" => Some(Role::Assistant),
        _ => None,
    }
}

/// Rule 1: a direct `role` field equal to `user` or `assistant`.
fn rule_explicit_role(record: &Value) -> Option<Role> {
    record
        .get("role")
        .and_then(Value::as_str)
        .and_then(role_from_str)
}

/// Rule 2: the role of the last entry of a non-empty `messages` array.
fn rule_last_message_role(record: &Value) -> Option<Role> {
    record
        .get("messages")?
        .as_array()?
        .last()?
        .get("role")
        .and_then(Value::as_str)
        .and_then(role_from_str)
}

/// Rule 3: `prompt` together with `completion` or `response`.
fn rule_prompt_with_reply(record: &Value) -> Option<Role> {
    let obj = record.as_object()?;
    if obj.contains_key("prompt")
        && (obj.contains_key("completion") || obj.contains_key("response"))
    {
        return Some(Role::Assistant);
    }
    None
}

/// Rule 4: `text` without any reply-shaped field.
fn rule_bare_text(record: &Value) -> Option<Role> {
    let obj = record.as_object()?;
    if obj.contains_key("text")
        && !["response", "completion", "choices"]
            .iter()
            .any(|k| obj.contains_key(*k))
    {
        return Some(Role::User);
    }
    None
}

/// Rule 5: any reply-shaped field present.
fn rule_reply_fields(record: &Value) -> Option<Role> {
    let obj = record.as_object()?;
    if ["response", "completion", "choices"]
        .iter()
        .any(|k| obj.contains_key(*k))
    {
        return Some(Role::Assistant);
    }
    None
}

/// Rule 6: an `event` (or, when absent or empty, `type`) name containing
/// `user`, `assistant`, or `completion`, case-insensitive.
fn rule_event_type_name(record: &Value) -> Option<Role> {
    let name = record
        .get("event")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .or_else(|| record.get("type").and_then(Value::as_str))?
        .to_lowercase();

    if name.contains("user") {
        return Some(Role::User);
    }
    if name.contains("assistant") || name.contains("completion") {
        return Some(Role::Assistant);
    }
    None
}

// ── UsageExtractor ────────────────────────────────────────────────────────────

/// Token counts extracted from one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageTokens {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Extracts token usage from a record's `usage` (or nested `meta.usage`)
/// mapping.
pub struct UsageExtractor;

impl UsageExtractor {
    /// Extract `(prompt, completion, total)` counts, defaulting to zeros.
    ///
    /// Key alternatives (`prompt_tokens`/`promptTokens`, …) are probed in
    /// order; the first non-zero numeric value wins. Floats truncate to
    /// integer, non-numeric values coerce to zero. When no explicit total
    /// is present, the total is `prompt + completion`. The presence of a
    /// `choices` field does not alter extraction.
    pub fn extract(record: &Value) -> UsageTokens {
        let Some(usage) = Self::usage_mapping(record) else {
            return UsageTokens::default();
        };

        let prompt = Self::find_count(usage, &["prompt_tokens", "promptTokens"]);
        let completion = Self::find_count(usage, &["completion_tokens", "completionTokens"]);
        let total = Self::find_nonzero(usage, &["total_tokens", "totalTokens"])
            .unwrap_or(prompt + completion);

        UsageTokens {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: total,
        }
    }

    /// First truthy value among `usage` and `meta.usage`, kept only if it
    /// is a mapping. A truthy non-mapping `usage` blocks the `meta.usage`
    /// fallback and yields zero usage; empty or null values fall through.
    fn usage_mapping(record: &Value) -> Option<&Value> {
        let truthy = |v: &&Value| match v {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(m) => !m.is_empty(),
        };
        record
            .get("usage")
            .filter(truthy)
            .or_else(|| record.get("meta")?.get("usage").filter(truthy))
            .filter(|v| v.is_object())
    }

    fn find_count(obj: &Value, keys: &[&str]) -> u64 {
        Self::find_nonzero(obj, keys).unwrap_or(0)
    }

    /// First key whose value is a non-zero number, truncated to u64.
    /// Zero values fall through to the next alternative key.
    fn find_nonzero(obj: &Value, keys: &[&str]) -> Option<u64> {
        for &key in keys {
            if let Some(f) = obj.get(key).and_then(Value::as_f64) {
                if f != 0.0 {
                    return Some(f.trunc() as u64);
                }
            }
        }
        None
    }
}

// ── RecordInterpreter ─────────────────────────────────────────────────────────

/// Turns raw log records into [`InterpretedEvent`]s: timestamp resolution,
/// local-day bucketing key, role classification, and usage extraction.
pub struct RecordInterpreter {
    days: DayMapper,
}

impl RecordInterpreter {
    pub fn new(days: DayMapper) -> Self {
        Self { days }
    }

    /// Interpret one record. `fallback` is the containing file's
    /// last-modified time, used when the record carries no usable
    /// timestamp.
    pub fn interpret(&self, record: &Value, fallback: DateTime<Utc>) -> InterpretedEvent {
        let instant = TimestampResolver::resolve(record, fallback);
        let usage = UsageExtractor::extract(record);
        InterpretedEvent {
            day: self.days.day(instant),
            role: RoleClassifier::classify(record),
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
