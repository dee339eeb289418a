use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::format::parse_epoch_millis;
use crate::listing::{FieldKind, FieldValue, ListRecord};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(DomainError::InvalidQuery(format!(
                "unsupported sort direction `{other}` (expected asc|desc)"
            ))),
        }
    }
}

/// Where records with a missing or unparseable sort key end up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPlacement {
    /// Missing keys compare below every value, so they lead ascending and
    /// trail descending.
    #[default]
    Lowest,
    First,
    Last,
}

impl FromStr for NullPlacement {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lowest" => Ok(Self::Lowest),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            other => Err(DomainError::InvalidQuery(format!(
                "unsupported null placement `{other}` (expected lowest|first|last)"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum SortKey {
    Bool(bool),
    /// Epoch milliseconds of a date field.
    Instant(i64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Instant(_) => 1,
            Self::Text(_) => 2,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Instant(left), Self::Instant(right)) => left.cmp(right),
            (Self::Text(left), Self::Text(right)) => collate(left, right),
            (left, right) => left.rank().cmp(&right.rank()),
        }
    }
}

fn sort_key<R: ListRecord>(record: &R, field: &str, kind: Option<FieldKind>) -> Option<SortKey> {
    let value = record.field(field)?;
    match (kind, value) {
        (Some(FieldKind::Date), FieldValue::Text(raw)) => {
            parse_epoch_millis(&raw).map(SortKey::Instant)
        }
        (_, FieldValue::Bool(flag)) => Some(SortKey::Bool(flag)),
        (_, FieldValue::List(items)) if items.is_empty() => None,
        (_, FieldValue::List(items)) => Some(SortKey::Text(items.join(", "))),
        (_, FieldValue::Text(text)) if text.trim().is_empty() => None,
        (_, FieldValue::Text(text)) => Some(SortKey::Text(text)),
    }
}

/// Stable sort of `records` by `field`. Unknown fields leave the order untouched.
pub fn sort<'a, R: ListRecord>(
    records: Vec<&'a R>,
    field: &str,
    direction: SortDirection,
    nulls: NullPlacement,
) -> Vec<&'a R> {
    let kind = R::field_spec(field).map(|spec| spec.kind);
    let mut keyed: Vec<(Option<SortKey>, &'a R)> =
        records.into_iter().map(|record| (sort_key(record, field, kind), record)).collect();

    keyed.sort_by(|(left, _), (right, _)| compare_keys(left.as_ref(), right.as_ref(), direction, nulls));
    keyed.into_iter().map(|(_, record)| record).collect()
}

fn compare_keys(
    left: Option<&SortKey>,
    right: Option<&SortKey>,
    direction: SortDirection,
    nulls: NullPlacement,
) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => direction.apply(left.compare(right)),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => missing_first(direction, nulls),
        (Some(_), None) => missing_first(direction, nulls).reverse(),
    }
}

fn missing_first(direction: SortDirection, nulls: NullPlacement) -> Ordering {
    match nulls {
        NullPlacement::Lowest => direction.apply(Ordering::Less),
        NullPlacement::First => Ordering::Less,
        NullPlacement::Last => Ordering::Greater,
    }
}

/// Collation for Korean list pages.
///
/// Precomposed Hangul syllables are laid out in 가나다 order in Unicode, so
/// scalar order is already correct for them. Latin letters compare
/// case-insensitively, lowercase first on ties. Runs of ASCII digits compare
/// by value, so `NB-2` sorts before `NB-10`.
pub fn collate(left: &str, right: &str) -> Ordering {
    compare_segments(left, right).then_with(|| {
        left.chars().map(case_rank).cmp(right.chars().map(case_rank)).then_with(|| left.cmp(right))
    })
}

#[derive(Clone, Copy, Debug)]
enum Segment<'a> {
    Digits(&'a str),
    Char(char),
}

impl Segment<'_> {
    fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Digits(left), Self::Digits(right)) => compare_digit_runs(left, right),
            (Self::Char(left), Self::Char(right)) => fold_case(left).cmp(&fold_case(right)),
            // Non-digit characters never fall inside '0'..='9', so any digit stands in.
            (Self::Digits(_), Self::Char(right)) => '0'.cmp(&fold_case(right)),
            (Self::Char(left), Self::Digits(_)) => fold_case(left).cmp(&'0'),
        }
    }
}

struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        if first.is_ascii_digit() {
            let end = self.rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(self.rest.len());
            let (digits, tail) = self.rest.split_at(end);
            self.rest = tail;
            Some(Segment::Digits(digits))
        } else {
            self.rest = &self.rest[first.len_utf8()..];
            Some(Segment::Char(first))
        }
    }
}

fn compare_segments(left: &str, right: &str) -> Ordering {
    let mut left = Segments { rest: left };
    let mut right = Segments { rest: right };
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(left), Some(right)) => match left.compare(right) {
                Ordering::Equal => {}
                unequal => return unequal,
            },
        }
    }
}

/// Compares digit runs by value; with equal values the run with fewer leading
/// zeros comes first.
fn compare_digit_runs(left: &str, right: &str) -> Ordering {
    let left_value = left.trim_start_matches('0');
    let right_value = right.trim_start_matches('0');
    left_value
        .len()
        .cmp(&right_value.len())
        .then_with(|| left_value.cmp(right_value))
        .then_with(|| left.len().cmp(&right.len()))
}

fn fold_case(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn case_rank(ch: char) -> u8 {
    u8::from(ch.is_uppercase())
}
