use serde::{Deserialize, Serialize};

use crate::domain::{null_as_default, text_field};
use crate::listing::{FieldKind, FieldSpec, FieldValue, ListRecord};

/// Directory entry as listed on the LDAP user page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LdapUserRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub title: Option<String>,
    pub enabled: Option<bool>,
}

const LDAP_USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("username", FieldKind::Text),
    FieldSpec::new("displayName", FieldKind::Text),
    FieldSpec::new("email", FieldKind::Text),
    FieldSpec::new("department", FieldKind::Text),
    FieldSpec::new("title", FieldKind::Text),
    FieldSpec::new("enabled", FieldKind::Bool),
];

impl ListRecord for LdapUserRecord {
    const KIND: &'static str = "ldap_user";
    const FIELDS: &'static [FieldSpec] = LDAP_USER_FIELDS;

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "username" => Some(FieldValue::Text(self.username.clone())),
            "displayName" => text_field(&self.display_name),
            "email" => text_field(&self.email),
            "department" => text_field(&self.department),
            "title" => text_field(&self.title),
            "enabled" => self.enabled.map(FieldValue::Bool),
            _ => None,
        }
    }
}
