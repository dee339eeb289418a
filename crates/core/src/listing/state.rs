use serde::{Deserialize, Serialize};

use crate::listing::{clamp_page, ListRecord, SortDirection, ALL_CHIP};

/// Whether a sort change sends the view back to page one. List pages differ
/// on this, so it is chosen per list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingPolicy {
    pub reset_page_on_sort: bool,
}

/// Everything a list page needs to reproduce its current view.
///
/// Transitions consume the state and return the next one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub filter_field: String,
    pub keyword: String,
    pub chip_value: String,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub current_page: usize,
    pub page_size: usize,
}

impl FilterState {
    pub fn new(filter_field: impl Into<String>, page_size: usize) -> Self {
        Self {
            filter_field: filter_field.into(),
            keyword: String::new(),
            chip_value: ALL_CHIP.to_string(),
            sort_field: None,
            sort_direction: SortDirection::Asc,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn with_filter_field(self, filter_field: impl Into<String>) -> Self {
        Self {
            filter_field: filter_field.into(),
            chip_value: ALL_CHIP.to_string(),
            current_page: 1,
            ..self
        }
    }

    pub fn with_keyword(self, keyword: impl Into<String>) -> Self {
        Self { keyword: keyword.into(), current_page: 1, ..self }
    }

    pub fn with_chip(self, chip_value: impl Into<String>) -> Self {
        Self { chip_value: chip_value.into(), current_page: 1, ..self }
    }

    pub fn with_page_size(self, page_size: usize) -> Self {
        Self { page_size: page_size.max(1), current_page: 1, ..self }
    }

    pub fn with_page(self, page: usize) -> Self {
        Self { current_page: page.max(1), ..self }
    }

    /// Column-header click: a new field starts at its default direction, the
    /// same field flips.
    pub fn toggle_sort<R: ListRecord>(self, field: &str, policy: PagingPolicy) -> Self {
        let direction = match self.sort_field.as_deref() {
            Some(current) if current == field => self.sort_direction.flipped(),
            _ => R::default_direction(field),
        };
        self.with_sort(field, direction, policy)
    }

    pub fn with_sort(
        self,
        field: impl Into<String>,
        direction: SortDirection,
        policy: PagingPolicy,
    ) -> Self {
        let current_page = if policy.reset_page_on_sort { 1 } else { self.current_page };
        Self { sort_field: Some(field.into()), sort_direction: direction, current_page, ..self }
    }

    /// Pulls the page back into range after the result count changed.
    pub fn clamped(self, total_items: usize) -> Self {
        let current_page = clamp_page(self.current_page, total_items, self.page_size);
        Self { current_page, ..self }
    }
}
