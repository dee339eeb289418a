pub mod approval;
pub mod device;
pub mod status;
pub mod user;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend identifiers arrive either as JSON numbers or strings; both are kept as text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawRecordId", into = "String")]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRecordId {
    Integer(i64),
    Text(String),
}

impl From<RawRecordId> for RecordId {
    fn from(value: RawRecordId) -> Self {
        match value {
            RawRecordId::Integer(id) => Self(id.to_string()),
            RawRecordId::Text(id) => Self(id),
        }
    }
}

/// Treats an explicit JSON `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

pub(crate) fn text_field(value: &Option<String>) -> Option<crate::listing::FieldValue> {
    value.as_ref().map(|text| crate::listing::FieldValue::Text(text.clone()))
}
