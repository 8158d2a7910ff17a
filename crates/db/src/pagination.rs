use serde::Deserialize;

#[macro_export]
macro_rules! paginate {
    ( $query:expr, $pagination:expr ) => {{
        $query.offset($pagination.offset()).limit($pagination.limit)
    }};
}

#[derive(Deserialize)]
pub struct PaginationQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Clone, Copy)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }

    /// Number of pages needed to show `total` rows, never less than 1.
    pub fn pages(&self, total: i64) -> i64 {
        std::cmp::max((total + self.limit - 1) / self.limit, 1)
    }
}

impl From<PaginationQuery> for Pagination {
    fn from(query: PaginationQuery) -> Self {
        let limit = match query.limit {
            None => 20,
            Some(limit) if limit < 1 => 20,
            Some(limit) if limit < 40 => limit,
            _ => 40,
        };
        let page = match query.page {
            Some(page) if page > 0 => page,
            _ => 1,
        };

        Pagination { page, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::{Pagination, PaginationQuery};

    #[test]
    fn defaults_and_clamping() {
        let pagination: Pagination = PaginationQuery {
            page: None,
            limit: None,
        }
        .into();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 20);

        let pagination: Pagination = PaginationQuery {
            page: Some(-4),
            limit: Some(1000),
        }
        .into();
        assert_eq!(pagination.page, 1);
        assert_eq!(pagination.limit, 40);
    }

    #[test]
    fn offset_and_page_count() {
        let pagination: Pagination = PaginationQuery {
            page: Some(3),
            limit: Some(10),
        }
        .into();
        assert_eq!(pagination.offset(), 20);
        assert_eq!(pagination.pages(0), 1);
        assert_eq!(pagination.pages(10), 1);
        assert_eq!(pagination.pages(11), 2);
        assert_eq!(pagination.pages(95), 10);
    }
}
