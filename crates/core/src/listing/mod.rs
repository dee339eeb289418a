//! Filter, sort and paginate over any [`ListRecord`].
//!
//! Every list page runs the same three stages: a chip pass and a keyword pass
//! over the selected field, a stable sort on the chosen column, and a page
//! slice. Each stage is a plain function so callers can stop after any of
//! them; [`query`] chains all three.

pub mod field;
pub mod filter;
pub mod paginate;
pub mod sort;
pub mod state;

pub use field::{ensure_field, FieldKind, FieldSpec, FieldValue, ListRecord};
pub use filter::filter;
pub use paginate::{clamp_page, paginate, total_pages, Page};
pub use sort::{collate, sort, NullPlacement, SortDirection};
pub use state::{FilterState, PagingPolicy};

/// Chip value that disables the chip pass.
pub const ALL_CHIP: &str = "ALL";
/// Filter field that searches a record's wildcard field set.
pub const ALL_FIELDS: &str = "all";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub null_placement: NullPlacement,
}

pub fn query<'a, R: ListRecord>(
    records: &'a [R],
    state: &FilterState,
    options: QueryOptions,
) -> Page<&'a R> {
    let filtered = filter(records, state);
    let matched = filtered.len();
    let sorted = match state.sort_field.as_deref() {
        Some(field) => sort(filtered, field, state.sort_direction, options.null_placement),
        None => filtered,
    };
    let page = paginate(sorted, state.current_page, state.page_size);

    tracing::debug!(
        event_name = "core.listing.query",
        record_kind = R::KIND,
        total_records = records.len(),
        matched,
        page = page.page,
        total_pages = page.total_pages,
        "list query evaluated"
    );
    page
}
