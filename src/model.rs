//! Analytics data model
//!
//! Wire shapes returned by the analytics API and the view-side types they
//! are reshaped into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five analytics endpoints the view reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Total,
    RedListed,
    Unlisted,
    Approved,
    Rejected,
}

impl Bucket {
    /// All buckets, in request order
    pub const ALL: [Bucket; 5] = [
        Bucket::Total,
        Bucket::RedListed,
        Bucket::Unlisted,
        Bucket::Approved,
        Bucket::Rejected,
    ];

    /// Human readable label used for chart titles and logs
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Total => "Total Analytics",
            Bucket::RedListed => "RedListed Analytics",
            Bucket::Unlisted => "UnListed Analytics",
            Bucket::Approved => "Approved",
            Bucket::Rejected => "Rejected",
        }
    }

    /// Whether the endpoint returns a `{date, count}` array
    pub fn is_series(&self) -> bool {
        matches!(self, Bucket::Total | Bucket::RedListed | Bucket::Unlisted)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================
// Wire types
// ============================================

/// A `count` field exactly as the API sent it.
///
/// Counts are not validated: a string or any other JSON value is kept and
/// shown verbatim. Only values that read as a finite number are plotted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Count {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Count {
    /// Numeric reading of the count, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Count::Number(v) => *v,
            Count::Text(s) => s.trim().parse::<f64>().ok()?,
            Count::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Count {
    fn from(value: f64) -> Self {
        Count::Number(value)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Number(v) => f.write_str(&format_count(*v)),
            Count::Text(s) => f.write_str(s),
            Count::Other(v) => write!(f, "{}", v),
        }
    }
}

/// A series element as sent by the API
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawPoint {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub count: Option<Count>,
}

impl RawPoint {
    pub fn new(date: impl Into<String>, count: impl Into<Count>) -> Self {
        Self {
            date: Some(date.into()),
            count: Some(count.into()),
        }
    }
}

/// A scalar counter response (`{"count": 42}`)
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RawCounter {
    #[serde(default)]
    pub count: Option<Count>,
}

impl RawCounter {
    pub fn new(count: impl Into<Count>) -> Self {
        Self {
            count: Some(count.into()),
        }
    }
}

/// The joined result of all five requests
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawAnalytics {
    pub total: Vec<RawPoint>,
    pub red_listed: Vec<RawPoint>,
    pub unlisted: Vec<RawPoint>,
    pub approved: RawCounter,
    pub rejected: RawCounter,
}

// ============================================
// View types
// ============================================

/// A chartable point: formatted timestamp plus the untouched count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub date: String,
    pub count: Option<Count>,
}

impl TimeSeriesPoint {
    /// Plotted value; `None` leaves a gap in the line
    pub fn value(&self) -> Option<f64> {
        self.count.as_ref().and_then(Count::as_f64)
    }
}

/// A scalar counter. `None` until loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct CounterValue(pub Option<Count>);

impl CounterValue {
    pub fn get(&self) -> Option<&Count> {
        self.0.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.0.is_some()
    }
}

impl From<f64> for CounterValue {
    fn from(value: f64) -> Self {
        CounterValue(Some(Count::Number(value)))
    }
}

/// Displays integral counts without a fractional part, non-numeric counts
/// verbatim, and nothing at all while unset.
impl fmt::Display for CounterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(count) => write!(f, "{}", count),
            None => Ok(()),
        }
    }
}

/// Format a count for labels and tooltips ("42", "3.5")
pub fn format_count(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Aggregated output of one fetch cycle
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AnalyticsSnapshot {
    pub total: Vec<TimeSeriesPoint>,
    pub red_listed: Vec<TimeSeriesPoint>,
    pub unlisted: Vec<TimeSeriesPoint>,
    pub approved: CounterValue,
    pub rejected: CounterValue,
}
