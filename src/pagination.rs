//! Page arithmetic for the book table plus the page-number strip shown in the
//! footer. Pages are 1-based everywhere.

/// Fixed number of records per page.
pub const PAGE_SIZE: usize = 30;

/// Number of pages needed for `records` items, `ceil(records / PAGE_SIZE)`.
pub fn total_pages(records: usize) -> usize {
    records.div_ceil(PAGE_SIZE)
}

/// The `[(page-1)*PAGE_SIZE, page*PAGE_SIZE)` window of `items`, clamped to
/// the slice bounds. A page past the end yields an empty slice.
pub fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE).min(items.len());
    let end = page.saturating_mul(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Page numbers to render in the page control. `None` marks an elided gap.
///
/// The strip always keeps `left_edge` pages at the start, `right_edge` pages
/// at the end, and a window of `left_current`/`right_current` pages around the
/// current one. The footer calls it with `(1, 2, 2, 1)`, so page 10 of 20
/// reads `1 … 8 9 [10] 11 12 … 20`.
pub fn page_strip(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(30), 1);
        assert_eq!(total_pages(31), 2);
        assert_eq!(total_pages(45), 2);
    }

    #[test]
    fn slice_windows_and_short_last_page() {
        let items: Vec<usize> = (0..45).collect();

        assert_eq!(page_slice(&items, 1), &items[0..30]);
        assert_eq!(page_slice(&items, 2), &items[30..45]);
        assert!(page_slice(&items, 3).is_empty());
    }

    #[test]
    fn slice_treats_page_zero_as_first() {
        let items: Vec<usize> = (0..5).collect();
        assert_eq!(page_slice(&items, 0), &items[..]);
    }

    #[test]
    fn strip_is_empty_without_pages() {
        assert!(page_strip(0, 1, 2, 2, 4, 2).is_empty());
    }

    #[test]
    fn strip_lists_every_page_when_short() {
        let pages = page_strip(3, 2, 2, 2, 4, 2);
        assert_eq!(pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn footer_window_keeps_edges_and_two_neighbours() {
        let pages = page_strip(20, 10, 1, 2, 2, 1);
        assert_eq!(
            pages,
            vec![
                Some(1),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                None,
                Some(20),
            ]
        );
    }

    #[test]
    fn footer_window_near_the_start_has_no_leading_gap() {
        let pages = page_strip(8, 2, 1, 2, 2, 1);
        assert_eq!(
            pages,
            vec![Some(1), Some(2), Some(3), Some(4), None, Some(8)]
        );
    }

    #[test]
    fn strip_elides_gaps_around_current_page() {
        let pages = page_strip(20, 10, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20),
            ]
        );
    }
}
