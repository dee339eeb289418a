use crate::errors::DomainError;
use crate::listing::SortDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bool,
    /// Text holding a timestamp; sorted by instant rather than by characters.
    Date,
    List,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default_direction: SortDirection,
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, default_direction: SortDirection::Asc }
    }

    pub const fn descending(self) -> Self {
        Self { default_direction: SortDirection::Desc, ..self }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl FieldValue {
    /// String form used by keyword search and chip matching.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Bool(flag) => flag.to_string(),
            Self::List(items) => items.join(", "),
        }
    }

    pub fn equals_chip(&self, chip: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item.trim() == chip),
            other => other.display_text().trim() == chip,
        }
    }

    /// `needle` must already be lowercased.
    pub fn contains_keyword(&self, needle: &str) -> bool {
        match self {
            Self::List(items) => items.iter().any(|item| item.to_lowercase().contains(needle)),
            other => other.display_text().to_lowercase().contains(needle),
        }
    }
}

/// A row type that can be driven through the listing engine.
pub trait ListRecord {
    /// Short name used in error messages.
    const KIND: &'static str;
    const FIELDS: &'static [FieldSpec];
    /// Fields searched when the filter field is `"all"`; `None` means every field.
    const WILDCARD_FIELDS: Option<&'static [&'static str]> = None;

    fn field(&self, name: &str) -> Option<FieldValue>;

    fn field_spec(name: &str) -> Option<&'static FieldSpec> {
        Self::FIELDS.iter().find(|spec| spec.name == name)
    }

    fn default_direction(name: &str) -> SortDirection {
        Self::field_spec(name).map(|spec| spec.default_direction).unwrap_or_default()
    }

    fn wildcard_fields() -> Vec<&'static str> {
        match Self::WILDCARD_FIELDS {
            Some(fields) => fields.to_vec(),
            None => Self::FIELDS.iter().map(|spec| spec.name).collect(),
        }
    }
}

/// Accepts any catalogued field, plus `"all"` when `allow_wildcard` is set.
pub fn ensure_field<R: ListRecord>(name: &str, allow_wildcard: bool) -> Result<(), DomainError> {
    if allow_wildcard && name == crate::listing::ALL_FIELDS {
        return Ok(());
    }
    if R::field_spec(name).is_some() {
        return Ok(());
    }

    Err(DomainError::UnknownField {
        record: R::KIND.to_string(),
        field: name.to_string(),
        known: R::FIELDS.iter().map(|spec| spec.name).collect::<Vec<_>>().join(", "),
    })
}
