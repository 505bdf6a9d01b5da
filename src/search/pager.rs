/// Fixed page size of the public search surface.
pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
}

/// Slices out page `page_index` (1-based). An empty input still counts
/// as one page of zero results. The pager never clamps: callers own the
/// clamp, and any out-of-range index (including 0) yields an empty
/// slice rather than an error.
pub fn paginate<T: Clone>(items: &[T], page_size: usize, page_index: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);

    let Some(zero_based) = page_index.checked_sub(1) else {
        return Page {
            items: Vec::new(),
            total_pages,
        };
    };

    let start = zero_based.saturating_mul(page_size);
    let items = if start < items.len() {
        let end = (start + page_size).min(items.len());
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page { items, total_pages }
}
