use db::pagination::Pagination;
use serde::Serialize;

/// List envelope: items plus the page arithmetic the frontend renders a
/// pager from.
#[derive(Serialize, Debug)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub pages: i64,
    pub page: i64,
    pub limit: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            pages: pagination.pages(total),
            page: pagination.page,
            limit: pagination.limit,
        }
    }
}
