//! Display rows for the approval and device tables.

use chrono::{DateTime, TimeZone};
use serde::Serialize;

use crate::domain::approval::ApprovalRecord;
use crate::domain::device::DeviceRecord;
use crate::domain::status::ApprovalStatus;
use crate::format::{format_date_in, status_class, StatusClass};
use crate::stage::{compute_stage_label, current_approver};
use crate::urgency::{compute_urgency_at, Urgency, UrgencyPolicy};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApprovalRow {
    pub approval_id: String,
    pub approval_type: String,
    pub device_id: Option<String>,
    pub category_name: Option<String>,
    pub user_name: Option<String>,
    pub approval_info: String,
    pub status: Option<ApprovalStatus>,
    pub status_class: StatusClass,
    pub stage_label: Option<String>,
    pub current_approver: Option<String>,
    pub submitted_at: String,
    pub deadline: String,
    pub urgency: Urgency,
}

impl ApprovalRow {
    pub fn from_record<Tz: TimeZone>(
        record: &ApprovalRecord,
        now: &DateTime<Tz>,
        policy: UrgencyPolicy,
    ) -> Self {
        let tz = now.timezone();
        let submitted = record.submitted_at.as_deref().or(record.created_date.as_deref());

        Self {
            approval_id: record.approval_id.to_string(),
            approval_type: record.approval_type.clone(),
            device_id: record.device_id.as_ref().map(ToString::to_string),
            category_name: record.category_name.clone(),
            user_name: record.user_name.clone(),
            approval_info: record.approval_info.clone(),
            status: record.status(),
            status_class: status_class(&record.approval_info),
            stage_label: compute_stage_label(&record.approval_info, &record.approvers),
            current_approver: current_approver(&record.approvers)
                .map(|step| step.username.clone()),
            submitted_at: format_date_in(submitted, true, &tz),
            deadline: format_date_in(record.deadline.as_deref(), false, &tz),
            urgency: compute_urgency_at(
                record.deadline.as_deref(),
                &record.approval_info,
                now,
                policy,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeviceRow {
    pub id: String,
    pub category_name: Option<String>,
    pub model: Option<String>,
    pub status: Option<String>,
    pub status_class: StatusClass,
    pub is_usable: bool,
    pub manage_dep_name: Option<String>,
    pub project_name: Option<String>,
    pub tags: Vec<String>,
    pub purchase_date: String,
    pub approval_info: Option<String>,
    pub approval_class: StatusClass,
    pub last_event: Option<String>,
    pub urgency: Urgency,
}

impl DeviceRow {
    pub fn from_record<Tz: TimeZone>(
        record: &DeviceRecord,
        now: &DateTime<Tz>,
        policy: UrgencyPolicy,
    ) -> Self {
        let tz = now.timezone();
        let approval_info = record.approval_info.as_deref().unwrap_or_default();

        Self {
            id: record.id.to_string(),
            category_name: record.category_name.clone(),
            model: record.model.clone(),
            status: record.status.clone(),
            status_class: status_class(record.status.as_deref().unwrap_or_default()),
            is_usable: record.is_usable,
            manage_dep_name: record.manage_dep_name.clone(),
            project_name: record.project_name.clone(),
            tags: record.tags.clone(),
            purchase_date: format_date_in(record.purchase_date.as_deref(), false, &tz),
            approval_info: record.approval_info.clone(),
            approval_class: status_class(approval_info),
            last_event: record.latest_history().and_then(|entry| entry.event_type.clone()),
            urgency: compute_urgency_at(record.deadline.as_deref(), approval_info, now, policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, TimeZone};

    use super::{ApprovalRow, DeviceRow};
    use crate::domain::approval::{ApprovalRecord, ApproverStep};
    use crate::domain::device::DeviceRecord;
    use crate::domain::status::ApprovalStatus;
    use crate::domain::RecordId;
    use crate::format::StatusClass;
    use crate::urgency::UrgencyPolicy;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .and_then(|tz| tz.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).single())
            .expect("valid timestamp")
    }

    #[test]
    fn approval_row_combines_every_derivation() {
        let record = ApprovalRecord {
            approval_id: RecordId::from("AP-7"),
            approval_type: "대여".to_string(),
            approval_info: "1차승인완료".to_string(),
            deadline: Some("2026-10-20".to_string()),
            submitted_at: Some("2026-10-15T13:45:00".to_string()),
            approvers: vec![
                ApproverStep { step: 1, username: "lee".to_string(), is_approved: true },
                ApproverStep { step: 2, username: "park".to_string(), is_approved: false },
            ],
            ..ApprovalRecord::default()
        };

        let row = ApprovalRow::from_record(&record, &now(), UrgencyPolicy::default());
        assert_eq!(row.status, Some(ApprovalStatus::StageApproved(1)));
        assert_eq!(row.status_class, StatusClass::Progress);
        assert_eq!(row.stage_label.as_deref(), Some("1차승인완료"));
        assert_eq!(row.current_approver.as_deref(), Some("park"));
        assert_eq!(row.submitted_at, "2026. 10. 15. 오후 1:45:00");
        assert_eq!(row.deadline, "2026. 10. 20.");
        assert_eq!(row.urgency.label.as_deref(), Some("긴급 D-2"));
    }

    #[test]
    fn approval_row_falls_back_to_created_date() {
        let record = ApprovalRecord {
            approval_id: RecordId::from("AP-8"),
            approval_info: "반려".to_string(),
            created_date: Some("2026-10-01".to_string()),
            ..ApprovalRecord::default()
        };

        let row = ApprovalRow::from_record(&record, &now(), UrgencyPolicy::default());
        assert_eq!(row.submitted_at, "2026. 10. 1. 오전 12:00:00");
        assert_eq!(row.deadline, "-");
        assert_eq!(row.status_class, StatusClass::Reject);
        assert!(!row.urgency.urgent);
    }

    #[test]
    fn device_row_flags_pending_application() {
        let device = DeviceRecord {
            id: RecordId::from("NB-9"),
            approval_info: Some("승인대기".to_string()),
            deadline: Some("2026-10-17".to_string()),
            purchase_date: Some("2023-02-01".to_string()),
            ..DeviceRecord::default()
        };

        let row = DeviceRow::from_record(&device, &now(), UrgencyPolicy::default());
        assert_eq!(row.urgency.label.as_deref(), Some("긴급 1일 지연"));
        assert_eq!(row.approval_class, StatusClass::Progress);
        assert_eq!(row.purchase_date, "2023. 2. 1.");
        assert_eq!(row.last_event, None);
        assert_eq!(row.status_class, StatusClass::Unknown);
    }

    #[test]
    fn device_row_classifies_ledger_status_separately() {
        let device = DeviceRecord {
            id: RecordId::from("NB-10"),
            status: Some("반납요청".to_string()),
            approval_info: Some("승인완료".to_string()),
            ..DeviceRecord::default()
        };

        let row = DeviceRow::from_record(&device, &now(), UrgencyPolicy::default());
        assert_eq!(row.status_class, StatusClass::Return);
        assert_eq!(row.approval_class, StatusClass::Complete);
        assert!(!row.urgency.urgent);
    }
}
