use serde::{Deserialize, Serialize};

use crate::domain::{null_as_default, text_field, RecordId};
use crate::listing::{FieldKind, FieldSpec, FieldValue, ListRecord};

/// One lifecycle event on a device: registration, rental, return or disposal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub user_name: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceRecord {
    pub id: RecordId,
    pub category_name: Option<String>,
    pub status: Option<String>,
    pub manage_dep_name: Option<String>,
    pub project_name: Option<String>,
    pub purpose: Option<String>,
    pub purchase_date: Option<String>,
    pub model: Option<String>,
    pub company: Option<String>,
    pub sn: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_usable: bool,
    pub approval_info: Option<String>,
    pub approval_type: Option<String>,
    pub deadline: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub history: Vec<HistoryEntry>,
}

impl DeviceRecord {
    /// Most recent history entry by date; entries without a date are skipped.
    pub fn latest_history(&self) -> Option<&HistoryEntry> {
        self.history
            .iter()
            .filter_map(|entry| {
                let millis = crate::format::parse_epoch_millis(entry.date.as_deref()?)?;
                Some((millis, entry))
            })
            .max_by_key(|(millis, _)| *millis)
            .map(|(_, entry)| entry)
    }
}

const DEVICE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("id", FieldKind::Text),
    FieldSpec::new("categoryName", FieldKind::Text),
    FieldSpec::new("status", FieldKind::Text),
    FieldSpec::new("manageDepName", FieldKind::Text),
    FieldSpec::new("projectName", FieldKind::Text),
    FieldSpec::new("purpose", FieldKind::Text),
    FieldSpec::new("purchaseDate", FieldKind::Date).descending(),
    FieldSpec::new("model", FieldKind::Text),
    FieldSpec::new("company", FieldKind::Text),
    FieldSpec::new("sn", FieldKind::Text),
    FieldSpec::new("description", FieldKind::Text),
    FieldSpec::new("tags", FieldKind::List),
    FieldSpec::new("isUsable", FieldKind::Bool),
    FieldSpec::new("approvalInfo", FieldKind::Text),
    FieldSpec::new("approvalType", FieldKind::Text),
    FieldSpec::new("deadline", FieldKind::Date),
];

const DEVICE_WILDCARD_FIELDS: &[&str] = &["categoryName", "id", "purpose", "description", "tags"];

impl ListRecord for DeviceRecord {
    const KIND: &'static str = "device";
    const FIELDS: &'static [FieldSpec] = DEVICE_FIELDS;
    const WILDCARD_FIELDS: Option<&'static [&'static str]> = Some(DEVICE_WILDCARD_FIELDS);

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Text(self.id.0.clone())),
            "categoryName" => text_field(&self.category_name),
            "status" => text_field(&self.status),
            "manageDepName" => text_field(&self.manage_dep_name),
            "projectName" => text_field(&self.project_name),
            "purpose" => text_field(&self.purpose),
            "purchaseDate" => text_field(&self.purchase_date),
            "model" => text_field(&self.model),
            "company" => text_field(&self.company),
            "sn" => text_field(&self.sn),
            "description" => text_field(&self.description),
            "tags" => Some(FieldValue::List(self.tags.clone())),
            "isUsable" => Some(FieldValue::Bool(self.is_usable)),
            "approvalInfo" => text_field(&self.approval_info),
            "approvalType" => text_field(&self.approval_type),
            "deadline" => text_field(&self.deadline),
            _ => None,
        }
    }
}
