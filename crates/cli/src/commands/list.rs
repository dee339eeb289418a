use std::fs;
use std::path::{Path, PathBuf};

use assetdesk_core::config::{AppConfig, MAX_PAGE_SIZE};
use assetdesk_core::listing::{ensure_field, ALL_CHIP};
use assetdesk_core::{ApplicationError, DomainError, FilterState, ListRecord, SortDirection};
use clap::Args;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Envelope keys under which paginated backend responses nest their rows.
const ENVELOPE_KEYS: &[&str] = &["content", "data"];

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    #[arg(long, help = "JSON snapshot exported from the backend")]
    pub input: PathBuf,
    #[arg(long, help = "Field the chip and keyword filters apply to")]
    pub field: Option<String>,
    #[arg(long, default_value = "", help = "Case-insensitive substring filter")]
    pub keyword: String,
    #[arg(long, default_value = ALL_CHIP, help = "Exact-match chip value, or ALL")]
    pub chip: String,
    #[arg(long, help = "Field to sort by")]
    pub sort: Option<String>,
    #[arg(long, conflicts_with = "asc", help = "Sort descending")]
    pub desc: bool,
    #[arg(long, help = "Sort ascending")]
    pub asc: bool,
    #[arg(long, default_value_t = 1, help = "1-based page number")]
    pub page: usize,
    #[arg(long, help = "Rows per page (defaults to listing.page_size)")]
    pub page_size: Option<usize>,
}

impl ListArgs {
    pub fn for_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            field: None,
            keyword: String::new(),
            chip: ALL_CHIP.to_string(),
            sort: None,
            desc: false,
            asc: false,
            page: 1,
            page_size: None,
        }
    }

    /// Builds the view state the way the list page would reach it: filter
    /// field first, then chip and keyword, then the sort column, then the page.
    pub fn filter_state<R: ListRecord>(
        &self,
        default_field: &str,
        allow_wildcard: bool,
        config: &AppConfig,
    ) -> Result<FilterState, DomainError> {
        let field = self.field.as_deref().unwrap_or(default_field);
        ensure_field::<R>(field, allow_wildcard)?;

        let page_size = self.page_size.unwrap_or(config.listing.page_size);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(DomainError::InvalidQuery(format!(
                "page size must be in range 1..={MAX_PAGE_SIZE}"
            )));
        }

        let mut state = FilterState::new(field, page_size)
            .with_chip(self.chip.trim())
            .with_keyword(self.keyword.as_str());

        if let Some(sort_field) = self.sort.as_deref() {
            ensure_field::<R>(sort_field, false)?;
            let direction = if self.desc {
                SortDirection::Desc
            } else if self.asc {
                SortDirection::Asc
            } else {
                R::default_direction(sort_field)
            };
            state = state.with_sort(sort_field, direction, config.paging_policy());
        }

        Ok(state.with_page(self.page))
    }
}

pub fn load_records<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>, ApplicationError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|error| ApplicationError::InputRead {
        path: display.clone(),
        message: error.to_string(),
    })?;

    let parse_error =
        |message: String| ApplicationError::InputParse { path: display.clone(), message };
    let document: Value =
        serde_json::from_str(&raw).map_err(|error| parse_error(error.to_string()))?;
    let rows = unwrap_envelope(document).ok_or_else(|| {
        parse_error(format!(
            "expected a JSON array or an object with one of: {}",
            ENVELOPE_KEYS.join(", ")
        ))
    })?;

    serde_json::from_value(rows).map_err(|error| parse_error(error.to_string()))
}

fn unwrap_envelope(document: Value) -> Option<Value> {
    match document {
        Value::Array(_) => Some(document),
        Value::Object(mut object) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| object.remove(*key).filter(Value::is_array)),
        _ => None,
    }
}
