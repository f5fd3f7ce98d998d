//! Cell values and record access.

use crate::error::DateParseError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A cell value in the table.
///
/// This is the closed set of comparable kinds the sort engine understands.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum CellValue {
    /// Missing value
    #[default]
    Null,
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Point in time (UTC)
    Date(DateTime<Utc>),
    /// Text value
    Text(String),
}

impl CellValue {
    /// Get display text for the cell.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(n) => format!("{n}"),
            Self::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
            Self::Date(d) => d.format("%Y-%m-%d").to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Whether this value is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value is a date.
    #[must_use]
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Milliseconds since the Unix epoch, coercing non-date values.
    ///
    /// Numbers are taken as milliseconds, booleans as 0/1 and text is parsed
    /// with [`CellValue::parse_date`]. Returns `None` for `Null`, non-finite
    /// numbers and unparseable text.
    #[must_use]
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            Self::Null => None,
            Self::Date(d) => Some(d.timestamp_millis()),
            Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Number(_) => None,
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Text(s) => Self::parse_date(s).ok().map(|d| d.timestamp_millis()),
        }
    }

    /// Parse text as a UTC date.
    ///
    /// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS[.fff]`,
    /// `YYYY-MM-DD HH:MM:SS` and plain `YYYY-MM-DD` (midnight UTC).
    pub fn parse_date(input: &str) -> Result<DateTime<Utc>, DateParseError> {
        let trimmed = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.with_timezone(&Utc));
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(Utc.from_utc_datetime(&naive));
            }
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| DateParseError {
                input: input.to_string(),
            })
    }

    /// Convert a JSON value into a cell value.
    ///
    /// Strings stay text; arrays and objects are rendered as JSON text.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        d.and_hms_opt(0, 0, 0)
            .map_or(Self::Null, |naive| Self::Date(Utc.from_utc_datetime(&naive)))
    }
}

impl<T: Into<Self>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Field access by name for rows of caller-defined shape.
///
/// Column keys are resolved through this trait when a column has no custom
/// sort accessor. A missing field is `CellValue::Null`.
pub trait Record {
    /// Read the field named `key`.
    fn field(&self, key: &str) -> CellValue;
}

/// A row of data keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cell values by column key
    pub cells: HashMap<String, CellValue>,
}

impl TableRow {
    /// Create a new empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell value.
    #[must_use]
    pub fn cell(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(key.into(), value.into());
        self
    }

    /// Get a cell value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.get(key)
    }
}

impl Record for TableRow {
    fn field(&self, key: &str) -> CellValue {
        self.cells.get(key).cloned().unwrap_or_default()
    }
}

impl Record for serde_json::Value {
    fn field(&self, key: &str) -> CellValue {
        self.get(key).map_or(CellValue::Null, CellValue::from_json)
    }
}
