//! Dates embedded in control fields.
//!
//! The 008 fixed field carries the publication dates as four-character
//! years in which `u` stands for an unknown digit; 005 carries the last
//! transaction timestamp. Values that cannot be read are logged and treated
//! as absent, never as an error for the whole record.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{ExtractError, Result};
use crate::extract::ExtractionContext;
use crate::marc_record::MarcRecord;

const FIXED_FIELD_TAG: &str = "008";
const TRANSACTION_TAG: &str = "005";
const DATE_TYPE_OFFSET: usize = 6;
const DATE1_OFFSET: usize = 7;
const DATE2_OFFSET: usize = 11;
const YEAR_LEN: usize = 4;

/// 008/06 values whose Date 2 ends a range.
const RANGE_DATE_TYPES: [&str; 7] = ["c", "d", "i", "k", "m", "q", "u"];

/// An end year meaning "still going".
const OPEN_END_YEAR: i32 = 9999;

const TRANSACTION_FORMAT: &str = "%Y%m%d%H%M%S";
const TRANSACTION_FORMAT_FRACTION: &str = "%Y%m%d%H%M%S%.f";

/// A span of publication years. `end` is `None` for an open range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First year
    pub start: i32,
    /// Last year, or `None` while still being published
    pub end: Option<i32>,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}-", self.start),
        }
    }
}

/// Read a four-character 008 year, replacing each `u` with `fill`.
///
/// Blank and fill-character (`|`) years are absent, as is `uuuu` read with a
/// `0` fill. Read with `9` it becomes the open end year.
fn parse_year(raw: &str, fill: char) -> Result<Option<i32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '|') || (trimmed == "uuuu" && fill == '0') {
        return Ok(None);
    }
    if raw.chars().count() != YEAR_LEN || !raw.chars().all(|c| c.is_ascii_digit() || c == 'u') {
        return Err(ExtractError::MalformedDate {
            raw: raw.to_string(),
            reason: "expected four digits or 'u'".to_string(),
        });
    }
    let digits: String = raw.chars().map(|c| if c == 'u' { fill } else { c }).collect();
    digits
        .parse()
        .map(Some)
        .map_err(|e: std::num::ParseIntError| ExtractError::MalformedDate {
            raw: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Absent on error, with a warning naming the offending value.
fn or_warn<T>(tag: &str, result: Result<Option<T>>) -> Option<T> {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(tag, error = %err, "ignoring malformed embedded date");
            None
        }
    }
}

fn year_at(record: &dyn MarcRecord, offset: usize, fill: char) -> Option<i32> {
    let raw = record.control_value_at(FIXED_FIELD_TAG, offset, YEAR_LEN)?;
    or_warn(FIXED_FIELD_TAG, parse_year(raw, fill))
}

/// Publication year from 008/07-10, unknown digits read as `0`.
///
/// # Examples
///
/// ```
/// use marc_discovery::{ExtractionContext, Record};
/// use marc_discovery::extract::date;
///
/// let record = Record::builder()
///     .control_field_str("008", "850101s19uu    xx            000 0 eng d")
///     .build();
/// assert_eq!(date::publication_year(&record, &ExtractionContext::default()), Some(1900));
/// ```
pub fn publication_year(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Option<i32> {
    year_at(record, DATE1_OFFSET, '0')
}

/// Publication years from 008/07-14.
///
/// Unknown start digits read as `0` and unknown end digits as `9`. For
/// single-date types, or when Date 2 is absent, the range covers one year.
/// An end year of 9999 leaves the range open.
pub fn publication_range(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Option<DateRange> {
    let start = year_at(record, DATE1_OFFSET, '0')?;
    let date_type = record.control_value_at(FIXED_FIELD_TAG, DATE_TYPE_OFFSET, 1)?;

    if !RANGE_DATE_TYPES.contains(&date_type) {
        return Some(DateRange {
            start,
            end: Some(start),
        });
    }

    let end = match year_at(record, DATE2_OFFSET, '9') {
        Some(OPEN_END_YEAR) => None,
        Some(year) => Some(year),
        None => Some(start),
    };
    Some(DateRange { start, end })
}

/// Parse a 005 transaction timestamp (`YYYYMMDDHHMMSS.F`).
///
/// # Errors
///
/// Returns [`ExtractError::MalformedDate`] if `raw` is not a valid timestamp.
pub fn parse_transaction_timestamp(raw: &str) -> Result<NaiveDateTime> {
    let value = raw.trim();
    let format = if value.contains('.') {
        TRANSACTION_FORMAT_FRACTION
    } else {
        TRANSACTION_FORMAT
    };
    NaiveDateTime::parse_from_str(value, format).map_err(|e| ExtractError::MalformedDate {
        raw: raw.to_string(),
        reason: e.to_string(),
    })
}

/// When the record was last changed, from 005.
pub fn last_updated(record: &dyn MarcRecord, _ctx: &ExtractionContext) -> Option<NaiveDateTime> {
    let raw = record.control_field(TRANSACTION_TAG)?;
    if raw.trim().is_empty() {
        return None;
    }
    or_warn(TRANSACTION_TAG, parse_transaction_timestamp(raw).map(Some))
}
