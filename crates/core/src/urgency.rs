use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::domain::status::is_active_label;
use crate::format::parse_timestamp;

pub const DEFAULT_URGENCY_WINDOW_DAYS: i64 = 5;

const DAY_MILLIS: i64 = 86_400_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyPolicy {
    /// Deadlines this many days out (or closer) are flagged.
    pub window_days: i64,
}

impl Default for UrgencyPolicy {
    fn default() -> Self {
        Self { window_days: DEFAULT_URGENCY_WINDOW_DAYS }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Urgency {
    pub urgent: bool,
    pub label: Option<String>,
    pub days: Option<i64>,
}

impl Urgency {
    pub fn none() -> Self {
        Self::default()
    }

    fn flagged(label: String, days: i64) -> Self {
        Self { urgent: true, label: Some(label), days: Some(days) }
    }
}

/// Urgency of an approval against the system clock with the default window.
pub fn compute_urgency(deadline: Option<&str>, approval_info: &str) -> Urgency {
    compute_urgency_at(deadline, approval_info, &Local::now(), UrgencyPolicy::default())
}

/// Urgency of an approval whose deadline is `deadline`, evaluated at `now`.
///
/// Only pending and partially approved requests can be urgent. Date-only
/// deadlines are read as midnight in `now`'s timezone.
pub fn compute_urgency_at<Tz: TimeZone>(
    deadline: Option<&str>,
    approval_info: &str,
    now: &DateTime<Tz>,
    policy: UrgencyPolicy,
) -> Urgency {
    let Some(raw) = deadline.filter(|raw| !raw.trim().is_empty()) else {
        return Urgency::none();
    };
    if !is_active_label(approval_info) {
        return Urgency::none();
    }
    let Some(deadline) = parse_timestamp(raw, &now.timezone()) else {
        return Urgency::none();
    };

    let days = ceil_days(deadline.timestamp_millis() - now.timestamp_millis());
    classify(days, policy)
}

fn ceil_days(millis: i64) -> i64 {
    let days = millis.div_euclid(DAY_MILLIS);
    if millis.rem_euclid(DAY_MILLIS) == 0 {
        days
    } else {
        days + 1
    }
}

fn classify(days: i64, policy: UrgencyPolicy) -> Urgency {
    if days > policy.window_days {
        return Urgency { urgent: false, label: None, days: Some(days) };
    }

    match days {
        0 => Urgency::flagged("긴급 오늘 마감".to_string(), days),
        days if days > 0 => Urgency::flagged(format!("긴급 D-{days}"), days),
        days => Urgency::flagged(format!("긴급 {}일 지연", days.unsigned_abs()), days),
    }
}
