//! Type-aware coercion of raw cell values into comparable sort keys.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid float pattern")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Declared value kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortType {
    #[default]
    String,
    Number,
    Date,
    Custom,
    /// The column is not sortable.
    None,
    /// Any unrecognized type; compared as raw text.
    #[serde(other)]
    Other,
}

impl SortType {
    /// Whether values of this type compare as their raw text.
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::String | Self::Other)
    }
}

/// A coerced, comparable sort key.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
}

impl SortValue {
    /// Total order: numbers before text, `-inf` first among numbers.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// User-supplied coercion for `custom` columns, called with `(raw, column)`.
#[derive(Clone)]
pub struct SortCleaner(Rc<dyn Fn(&str, usize) -> SortValue>);

impl SortCleaner {
    pub fn new(f: impl Fn(&str, usize) -> SortValue + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn clean(&self, raw: &str, column: usize) -> SortValue {
        (self.0)(raw, column)
    }
}

impl fmt::Debug for SortCleaner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SortCleaner(..)")
    }
}

/// Parse the leading float of a string, ignoring trailing garbage.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.trim_start_matches(['+', '-']);
    if unsigned.starts_with("Infinity") {
        return Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }
    FLOAT_PREFIX
        .find(trimmed)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse a date or date-time into milliseconds since the Unix epoch.
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis() as f64);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis() as f64);
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc().timestamp_millis() as f64);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, format)
            && let Some(dt) = date.and_hms_opt(0, 0, 0)
        {
            return Some(dt.and_utc().timestamp_millis() as f64);
        }
    }
    None
}

/// Memoized coercions keyed by `(type, raw value)`.
///
/// Instance scoped and never invalidated: raw cell values do not change once
/// loaded. With a limit set, the cache is emptied when it would exceed it.
#[derive(Debug, Default)]
pub struct SortValueCache {
    entries: HashMap<SortType, HashMap<String, SortValue>>,
    len: usize,
    limit: Option<usize>,
    coercions: usize,
}

impl SortValueCache {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of coercions actually computed (cache misses).
    pub fn coercions(&self) -> usize {
        self.coercions
    }

    pub fn get(&self, sort_type: SortType, raw: &str) -> Option<&SortValue> {
        self.entries.get(&sort_type).and_then(|m| m.get(raw))
    }

    /// Coerce `raw` for `sort_type`, reusing a cached value when present.
    pub fn coerce(
        &mut self,
        sort_type: SortType,
        raw: &str,
        column: usize,
        cleaner: Option<&SortCleaner>,
    ) -> SortValue {
        if let Some(value) = self.get(sort_type, raw) {
            return value.clone();
        }

        let value = match sort_type {
            SortType::Number => SortValue::Number(parse_number(raw).unwrap_or(f64::NEG_INFINITY)),
            SortType::Date => {
                SortValue::Number(parse_timestamp(raw).unwrap_or(f64::NEG_INFINITY))
            }
            SortType::Custom => match cleaner {
                Some(cleaner) => cleaner.clean(raw, column),
                None => SortValue::Text(raw.to_string()),
            },
            SortType::String | SortType::None | SortType::Other => {
                SortValue::Text(raw.to_string())
            }
        };
        self.coercions += 1;

        if let Some(limit) = self.limit
            && self.len >= limit
        {
            log::debug!("[sort] value cache reached {limit} entries, clearing");
            self.entries.clear();
            self.len = 0;
        }
        self.entries
            .entry(sort_type)
            .or_default()
            .insert(raw.to_string(), value.clone());
        self.len += 1;
        value
    }

    /// Compare two raw values under `sort_type`.
    ///
    /// Equal raw values are equal without coercion; identity types compare
    /// their raw text directly.
    pub fn compare(
        &mut self,
        sort_type: SortType,
        a: &str,
        b: &str,
        column: usize,
        cleaner: Option<&SortCleaner>,
    ) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        if sort_type.is_identity() {
            return a.cmp(b);
        }
        let left = self.coerce(sort_type, a, column, cleaner);
        let right = self.coerce(sort_type, b, column, cleaner);
        left.compare(&right)
    }
}
