//! Activity log queries.
//!
//! Raw `from`/`to`/`limit` query parameters are normalized into a [`LogQuery`]
//! without ever failing, and [`build_log`] applies that query to a user's
//! entries in store order.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{display_date, ExerciseEntry};

/// Date shapes accepted for `from`, `to` and an exercise's `date`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%a %b %d %Y"];
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// How the `from` and `to` bounds combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// An entry must lie after `from` and before `to`.
    #[default]
    Both,
    /// An entry passes when either bound is absent or satisfied. Kept for
    /// clients that depend on the behavior of the first deployment.
    Either,
}

impl FilterMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterMode::Both => "both",
            FilterMode::Either => "either",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "both" => Some(FilterMode::Both),
            "either" => Some(FilterMode::Either),
            _ => None,
        }
    }

    pub fn accepts(
        &self,
        date: NaiveDate,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> bool {
        let after_from = from.map_or(true, |from| date > from);
        let before_to = to.map_or(true, |to| date < to);
        match self {
            FilterMode::Both => after_from && before_to,
            FilterMode::Either => after_from || before_to,
        }
    }
}

/// Query string of `GET /api/users/{id}/logs`, exactly as the client sent it.
#[derive(Debug, Clone, Default)]
pub struct LogParams {
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

impl LogParams {
    /// Collect the known keys from raw query pairs. A repeated key keeps its
    /// first value; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "from" => &mut params.from,
                "to" => &mut params.to,
                "limit" => &mut params.limit,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: i64,
}

impl LogQuery {
    pub fn normalize(params: &LogParams, total_count: usize) -> Self {
        Self {
            from: normalize_date(params.from.as_deref()),
            to: normalize_date(params.to.as_deref()),
            limit: normalize_limit(params.limit.as_deref(), total_count),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogItem {
    pub description: String,
    pub duration: i64,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLog {
    /// Number of entries considered after the limit, before date filtering.
    pub count: i64,
    pub log: Vec<LogItem>,
}

/// Parse an optional date bound. Missing, empty and unparseable input all
/// mean "no bound".
pub fn normalize_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    let parsed = parse_date(raw);
    if parsed.is_none() {
        tracing::debug!("Ignoring unparseable date: {:?}", raw);
    }
    parsed
}

/// Parse an optional limit against the number of available entries.
///
/// Missing, non-numeric or too-large limits fall back to `total_count`.
/// Zero and negative limits are returned unchanged.
pub fn normalize_limit(raw: Option<&str>, total_count: usize) -> i64 {
    let total = i64::try_from(total_count).unwrap_or(i64::MAX);
    match raw.and_then(parse_leading_int) {
        Some(limit) if limit <= total => limit,
        _ => total,
    }
}

/// Apply a normalized query to entries in store order.
pub fn build_log(entries: &[ExerciseEntry], query: &LogQuery, mode: FilterMode) -> ExerciseLog {
    let considered = usize::try_from(query.limit).unwrap_or(0);

    let log = entries
        .iter()
        .take(considered)
        .filter(|entry| mode.accepts(entry.date, query.from, query.to))
        .map(|entry| LogItem {
            description: entry.description.clone(),
            duration: entry.duration,
            date: display_date(entry.date),
        })
        .collect();

    ExerciseLog {
        count: query.limit,
        log,
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_TIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Leading-integer parse: optional whitespace and sign, then digits up to
/// the first non-digit ("12abc" is 12, "3.9" is 3). A `0x` prefix switches
/// to hexadecimal ("0x10" is 16).
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = rest
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(rest.len());
    let value = i64::from_str_radix(&rest[..end], radix).ok()?;

    Some(if negative { -value } else { value })
}
