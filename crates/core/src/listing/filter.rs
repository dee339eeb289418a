use crate::listing::{FilterState, ListRecord, ALL_CHIP, ALL_FIELDS};

/// Keeps records passing both the chip pass and the keyword pass.
///
/// Takes any iterator of references so a filtered result can be fed back in.
pub fn filter<'a, R, I>(records: I, state: &FilterState) -> Vec<&'a R>
where
    R: ListRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let chip = state.chip_value.trim();
    let chip = (chip != ALL_CHIP).then_some(chip);
    let keyword = state.keyword.trim().to_lowercase();
    let keyword = (!keyword.is_empty()).then_some(keyword);

    if chip.is_none() && keyword.is_none() {
        return records.into_iter().collect();
    }

    let fields = target_fields::<R>(&state.filter_field);
    records
        .into_iter()
        .filter(|record| {
            let values: Vec<_> = fields.iter().filter_map(|name| record.field(name)).collect();
            let chip_ok = chip.map_or(true, |chip| values.iter().any(|value| value.equals_chip(chip)));
            let keyword_ok = keyword
                .as_deref()
                .map_or(true, |keyword| values.iter().any(|value| value.contains_keyword(keyword)));
            chip_ok && keyword_ok
        })
        .collect()
}

fn target_fields<R: ListRecord>(filter_field: &str) -> Vec<&str> {
    if filter_field == ALL_FIELDS {
        R::wildcard_fields()
    } else {
        vec![filter_field]
    }
}
