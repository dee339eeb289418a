//! Display helpers shared by every list page: timestamp rendering and the
//! status-to-class mapping used to colour status badges.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::status::{stage_approved_number, APPROVED_LABEL};

pub const EMPTY_PLACEHOLDER: &str = "-";

const NAIVE_DATE_TIME_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];
const OFFSET_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the timestamp shapes the backend emits.
///
/// Values carrying an offset keep their instant; naive values (with or
/// without a time part) are read as wall-clock time in `tz`.
pub fn parse_timestamp<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(tz));
    }
    for pattern in OFFSET_DATE_TIME_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, pattern) {
            return Some(parsed.with_timezone(tz));
        }
    }
    for pattern in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return tz.from_local_datetime(&naive).earliest();
        }
    }

    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    tz.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest()
}

/// Epoch milliseconds of a timestamp, reading naive values as UTC.
pub fn parse_epoch_millis(raw: &str) -> Option<i64> {
    parse_timestamp(raw, &Utc).map(|parsed| parsed.timestamp_millis())
}

/// Renders `value` in the Korean locale style (`2024. 3. 5.` and
/// `2024. 3. 5. 오후 2:07:09`) using the system timezone.
pub fn format_date(value: Option<&str>, with_time: bool) -> String {
    format_date_in(value, with_time, &Local)
}

pub fn format_date_in<Tz: TimeZone>(value: Option<&str>, with_time: bool, tz: &Tz) -> String {
    let Some(raw) = value.filter(|raw| !raw.trim().is_empty()) else {
        return EMPTY_PLACEHOLDER.to_string();
    };
    let Some(parsed) = parse_timestamp(raw, tz) else {
        return raw.to_string();
    };

    let local = parsed.naive_local();
    let date = format!("{}. {}. {}.", local.year(), local.month(), local.day());
    if !with_time {
        return date;
    }

    let (is_pm, hour) = local.hour12();
    let meridiem = if is_pm { "오후" } else { "오전" };
    format!("{date} {meridiem} {hour}:{:02}:{:02}", local.minute(), local.second())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusClass {
    #[serde(rename = "status-progress")]
    Progress,
    #[serde(rename = "status-complete")]
    Complete,
    #[serde(rename = "status-reject")]
    Reject,
    #[serde(rename = "status-return")]
    Return,
    #[serde(rename = "status-unknown")]
    Unknown,
}

impl StatusClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Progress => "status-progress",
            Self::Complete => "status-complete",
            Self::Reject => "status-reject",
            Self::Return => "status-return",
            Self::Unknown => "status-unknown",
        }
    }
}

const STATUS_CLASS_TABLE: &[(&str, StatusClass)] = &[
    ("승인대기", StatusClass::Progress),
    ("대기", StatusClass::Progress),
    ("진행중", StatusClass::Progress),
    ("완료", StatusClass::Complete),
    ("반려", StatusClass::Reject),
    ("거절", StatusClass::Reject),
    ("취소", StatusClass::Reject),
    ("승인취소", StatusClass::Reject),
    ("반납", StatusClass::Return),
    ("반납완료", StatusClass::Return),
    ("반납요청", StatusClass::Return),
];

pub fn status_class(status: &str) -> StatusClass {
    let status = status.trim();
    if status == APPROVED_LABEL {
        return StatusClass::Complete;
    }
    if stage_approved_number(status).is_some() {
        return StatusClass::Progress;
    }

    STATUS_CLASS_TABLE
        .iter()
        .find(|(label, _)| *label == status)
        .map(|(_, class)| *class)
        .unwrap_or(StatusClass::Unknown)
}
