use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Always at least one page, even for an empty list. A zero page size counts as one.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(page: usize, total_items: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(total_items, page_size))
}

/// Slices out `page` (1-based, clamped into range) of `items`.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = page.clamp(1, total_pages);

    let items = items.into_iter().skip((page - 1) * page_size).take(page_size).collect();
    Page { items, page, page_size, total_items, total_pages }
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, paginate, total_pages};

    #[test]
    fn empty_list_has_single_empty_page() {
        let page = paginate(Vec::<u32>::new(), 1, 10);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_items, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn last_page_holds_remainder() {
        let page = paginate((1..=12).collect::<Vec<_>>(), 3, 5);
        assert_eq!(page.items, vec![11, 12]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let page = paginate((1..=12).collect::<Vec<_>>(), 9, 5);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![11, 12]);

        let page = paginate((1..=12).collect::<Vec<_>>(), 0, 5);
        assert_eq!(page.page, 1);
        assert_eq!(page.items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn zero_page_size_counts_as_one() {
        assert_eq!(total_pages(3, 0), 3);
        let page = paginate(vec!['a', 'b'], 2, 0);
        assert_eq!(page.items, vec!['b']);
        assert_eq!(page.page_size, 1);
    }

    #[test]
    fn clamp_follows_shrinking_totals() {
        assert_eq!(clamp_page(4, 12, 5), 3);
        assert_eq!(clamp_page(4, 0, 5), 1);
        assert_eq!(clamp_page(2, 12, 5), 2);
    }
}
