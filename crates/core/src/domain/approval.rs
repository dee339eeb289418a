use serde::{Deserialize, Serialize};

use crate::domain::status::ApprovalStatus;
use crate::domain::{null_as_default, text_field, RecordId};
use crate::listing::{FieldKind, FieldSpec, FieldValue, ListRecord};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApproverStep {
    #[serde(deserialize_with = "null_as_default")]
    pub step: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_approved: bool,
}

/// Snapshot of one approval request as served by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApprovalRecord {
    pub approval_id: RecordId,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub approval_type: String,
    pub device_id: Option<RecordId>,
    pub category_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub approval_info: String,
    pub approval_status: Option<String>,
    pub deadline: Option<String>,
    pub created_date: Option<String>,
    pub submitted_at: Option<String>,
    pub user_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub approvers: Vec<ApproverStep>,
}

impl ApprovalRecord {
    pub fn status(&self) -> Option<ApprovalStatus> {
        ApprovalStatus::parse(&self.approval_info)
    }
}

const APPROVAL_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("approvalId", FieldKind::Text),
    FieldSpec::new("type", FieldKind::Text),
    FieldSpec::new("deviceId", FieldKind::Text),
    FieldSpec::new("categoryName", FieldKind::Text),
    FieldSpec::new("approvalInfo", FieldKind::Text),
    FieldSpec::new("approvalStatus", FieldKind::Text),
    FieldSpec::new("deadline", FieldKind::Date),
    FieldSpec::new("createdDate", FieldKind::Date).descending(),
    FieldSpec::new("submittedAt", FieldKind::Date).descending(),
    FieldSpec::new("userName", FieldKind::Text),
];

impl ListRecord for ApprovalRecord {
    const KIND: &'static str = "approval";
    const FIELDS: &'static [FieldSpec] = APPROVAL_FIELDS;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "approvalId" => Some(FieldValue::Text(self.approval_id.0.clone())),
            "type" => Some(FieldValue::Text(self.approval_type.clone())),
            "deviceId" => self.device_id.as_ref().map(|id| FieldValue::Text(id.0.clone())),
            "categoryName" => text_field(&self.category_name),
            "approvalInfo" => Some(FieldValue::Text(self.approval_info.clone())),
            "approvalStatus" => text_field(&self.approval_status),
            "deadline" => text_field(&self.deadline),
            "createdDate" => text_field(&self.created_date),
            "submittedAt" => text_field(&self.submitted_at),
            "userName" => text_field(&self.user_name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ApprovalRecord;
    use crate::domain::status::ApprovalStatus;
    use crate::listing::{ListRecord, SortDirection};

    #[test]
    fn deserializes_backend_payload_with_numeric_ids_and_nulls() {
        let record: ApprovalRecord = serde_json::from_str(
            r#"{
                "approvalId": 42,
                "type": "대여",
                "deviceId": "NB-2024-001",
                "categoryName": "노트북",
                "approvalInfo": "2차승인완료",
                "deadline": null,
                "submittedAt": "2026-10-01T09:30:00",
                "userName": "kim",
                "approvers": [
                    {"step": 1, "username": "lee", "isApproved": true},
                    {"step": 2, "username": "park", "isApproved": true},
                    {"step": 3, "username": "choi", "isApproved": false}
                ]
            }"#,
        )
        .expect("payload should deserialize");

        assert_eq!(record.approval_id.as_str(), "42");
        assert_eq!(record.deadline, None);
        assert_eq!(record.approvers.len(), 3);
        assert_eq!(record.status(), Some(ApprovalStatus::StageApproved(2)));
    }

    #[test]
    fn null_collections_default_to_empty() {
        let record: ApprovalRecord =
            serde_json::from_str(r#"{"approvalId": "A-1", "approvers": null, "type": null}"#)
                .expect("payload should deserialize");

        assert!(record.approvers.is_empty());
        assert!(record.approval_type.is_empty());
        assert_eq!(record.status(), None);
    }

    #[test]
    fn recency_fields_sort_descending_by_default() {
        assert_eq!(ApprovalRecord::default_direction("submittedAt"), SortDirection::Desc);
        assert_eq!(ApprovalRecord::default_direction("createdDate"), SortDirection::Desc);
        assert_eq!(ApprovalRecord::default_direction("deadline"), SortDirection::Asc);
        assert_eq!(ApprovalRecord::default_direction("unknown"), SortDirection::Asc);
    }
}
