use std::fmt;

use serde::{Deserialize, Serialize};

pub const PENDING_LABEL: &str = "승인대기";
pub const APPROVED_LABEL: &str = "승인완료";
pub const REJECTED_LABEL: &str = "반려";
pub const CANCELLED_LABEL: &str = "취소";

const APPROVAL_CANCELLED_LABEL: &str = "승인취소";
const STAGE_APPROVED_SUFFIX: &str = "차승인완료";

/// Typed view over the backend's free-form approval status strings.
///
/// `parse` is the only place raw labels are matched; everything downstream
/// works with the variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "stage", rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    StageApproved(u32),
    Approved,
    Rejected,
    Cancelled,
}

impl ApprovalStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Some(stage) = stage_approved_number(raw) {
            return Some(Self::StageApproved(stage));
        }

        match raw {
            PENDING_LABEL => Some(Self::Pending),
            APPROVED_LABEL => Some(Self::Approved),
            REJECTED_LABEL => Some(Self::Rejected),
            CANCELLED_LABEL | APPROVAL_CANCELLED_LABEL => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Pending and partially approved requests are still moving through the chain.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::StageApproved(_))
    }

    pub fn label(self) -> String {
        match self {
            Self::Pending => PENDING_LABEL.to_string(),
            Self::StageApproved(stage) => stage_approved_label(stage),
            Self::Approved => APPROVED_LABEL.to_string(),
            Self::Rejected => REJECTED_LABEL.to_string(),
            Self::Cancelled => CANCELLED_LABEL.to_string(),
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

pub fn is_active_label(raw: &str) -> bool {
    ApprovalStatus::parse(raw).is_some_and(ApprovalStatus::is_active)
}

pub fn stage_approved_label(stage: u32) -> String {
    format!("{stage}{STAGE_APPROVED_SUFFIX}")
}

/// Matches `<ascii digits>차승인완료`. Stage numbers beyond `u32` saturate.
pub fn stage_approved_number(raw: &str) -> Option<u32> {
    let digits = raw.strip_suffix(STAGE_APPROVED_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    Some(digits.parse::<u32>().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::{is_active_label, stage_approved_number, ApprovalStatus};

    #[test]
    fn parses_every_known_label() {
        assert_eq!(ApprovalStatus::parse("승인대기"), Some(ApprovalStatus::Pending));
        assert_eq!(ApprovalStatus::parse("승인완료"), Some(ApprovalStatus::Approved));
        assert_eq!(ApprovalStatus::parse("반려"), Some(ApprovalStatus::Rejected));
        assert_eq!(ApprovalStatus::parse("취소"), Some(ApprovalStatus::Cancelled));
        assert_eq!(ApprovalStatus::parse("승인취소"), Some(ApprovalStatus::Cancelled));
        assert_eq!(ApprovalStatus::parse("3차승인완료"), Some(ApprovalStatus::StageApproved(3)));
    }

    #[test]
    fn trims_before_matching() {
        assert_eq!(ApprovalStatus::parse("  2차승인완료 "), Some(ApprovalStatus::StageApproved(2)));
        assert_eq!(ApprovalStatus::parse(" 승인대기\n"), Some(ApprovalStatus::Pending));
    }

    #[test]
    fn rejects_malformed_stage_labels() {
        assert_eq!(stage_approved_number("차승인완료"), None);
        assert_eq!(stage_approved_number("2차 승인완료"), None);
        assert_eq!(stage_approved_number("a2차승인완료"), None);
        assert_eq!(stage_approved_number("２차승인완료"), None);
        assert_eq!(ApprovalStatus::parse("대여중"), None);
    }

    #[test]
    fn oversized_stage_numbers_saturate() {
        assert_eq!(stage_approved_number("99999999999차승인완료"), Some(u32::MAX));
    }

    #[test]
    fn only_pending_and_stage_approved_are_active() {
        assert!(is_active_label("승인대기"));
        assert!(is_active_label("1차승인완료"));
        assert!(!is_active_label("승인완료"));
        assert!(!is_active_label("반려"));
        assert!(!is_active_label(""));
    }

    #[test]
    fn labels_round_trip_through_display() {
        for status in [
            ApprovalStatus::Pending,
            ApprovalStatus::StageApproved(4),
            ApprovalStatus::Approved,
            ApprovalStatus::Rejected,
            ApprovalStatus::Cancelled,
        ] {
            assert_eq!(ApprovalStatus::parse(&status.to_string()), Some(status));
        }
    }
}
