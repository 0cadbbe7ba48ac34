//! Import/export document codec.
//!
//! # Responsibility
//! - Wrap the entry collection in a versioned export document.
//! - Validate an external document completely before anything is replaced.
//!
//! # Invariants
//! - Import is all-or-nothing: the first violation aborts the whole document.
//! - Only `entries` is consulted on import; `meta` is ignored.

use crate::model::entry::{parse_iso_date, Entry, EntryCollection};
use crate::validation::is_valid_number;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Application tag written into `meta.app`.
pub const APP_TAG: &str = "365-positions-tracker";
/// Current export document version.
pub const EXPORT_VERSION: u32 = 1;
/// Suggested file name for downloads/saves.
pub const EXPORT_FILE_NAME: &str = "positions-tracker-export.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    /// RFC 3339 UTC timestamp with millisecond precision.
    pub exported_at: String,
    pub app: String,
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub meta: ExportMeta,
    pub entries: EntryCollection,
}

/// Wraps `entries` with export metadata stamped at `exported_at`.
pub fn export_document(entries: &[Entry], exported_at: DateTime<Utc>) -> ExportDocument {
    ExportDocument {
        meta: ExportMeta {
            exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            app: APP_TAG.to_string(),
            version: EXPORT_VERSION,
        },
        entries: entries.to_vec(),
    }
}

/// Pretty-printed JSON bytes of an export document.
pub fn to_pretty_json(document: &ExportDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// Why an import document was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportError {
    /// Text is not JSON at all.
    Malformed(String),
    /// `entries` is absent or not an array.
    MissingEntries,
    /// Item at `index` lacks a string `date` or a numeric `number`.
    InvalidItemShape { index: usize },
    InvalidDate { index: usize, value: String },
    InvalidNumber { index: usize, value: f64 },
    DuplicateNumber(u16),
    DuplicateDate(NaiveDate),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(details) => write!(f, "Invalid file: not JSON ({details})"),
            Self::MissingEntries => write!(f, "Invalid file: missing entries[]"),
            Self::InvalidItemShape { index } => write!(f, "Invalid item shape at entries[{index}]"),
            Self::InvalidDate { index, value } => {
                write!(f, "Invalid date `{value}` at entries[{index}]")
            }
            Self::InvalidNumber { value, .. } => write!(f, "Invalid number {value}"),
            Self::DuplicateNumber(number) => write!(f, "Duplicate number in import: {number}"),
            Self::DuplicateDate(date) => write!(f, "Duplicate date in import: {date}"),
        }
    }
}

impl Error for ImportError {}

/// Parses JSON text and validates it with [`import_document`].
pub fn import_json(text: &str) -> Result<EntryCollection, ImportError> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| ImportError::Malformed(err.to_string()))?;
    import_document(&value)
}

/// Validates a parsed document and returns its entries in document order.
pub fn import_document(document: &Value) -> Result<EntryCollection, ImportError> {
    let items = document
        .get("entries")
        .and_then(Value::as_array)
        .ok_or(ImportError::MissingEntries)?;

    let mut numbers = HashSet::with_capacity(items.len());
    let mut dates = HashSet::with_capacity(items.len());
    let mut entries = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        let (raw_date, raw_number) = match (
            item.get("date").and_then(Value::as_str),
            item.get("number").and_then(Value::as_f64),
        ) {
            (Some(date), Some(number)) => (date, number),
            _ => return Err(ImportError::InvalidItemShape { index }),
        };

        let date = parse_iso_date(raw_date).ok_or_else(|| ImportError::InvalidDate {
            index,
            value: raw_date.to_string(),
        })?;
        if !is_valid_number(raw_number) {
            return Err(ImportError::InvalidNumber {
                index,
                value: raw_number,
            });
        }
        let number = raw_number as u16;

        if !numbers.insert(number) {
            return Err(ImportError::DuplicateNumber(number));
        }
        if !dates.insert(date) {
            return Err(ImportError::DuplicateDate(date));
        }
        entries.push(Entry::new(date, number));
    }

    Ok(entries)
}
