use serde::Serialize;

pub const MAX_ROWS_PER_PAGE: usize = 100;

/// One page of a result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served.
    pub page: usize,
    pub rows_per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Slice `items` into a page. `page` is 1-based and clamped into range;
    /// `rows_per_page` is clamped to `1..=MAX_ROWS_PER_PAGE`.
    pub fn paginate(items: &[T], page: usize, rows_per_page: usize) -> Self {
        let rows_per_page = rows_per_page.clamp(1, MAX_ROWS_PER_PAGE);
        let total = items.len();
        let total_pages = total.div_ceil(rows_per_page).max(1);
        let page = page.clamp(1, total_pages);

        let start = (page - 1) * rows_per_page;
        let end = (start + rows_per_page).min(total);
        let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

        Self {
            items,
            page,
            rows_per_page,
            total,
            total_pages,
        }
    }
}
