use serde::{Deserialize, Serialize};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 20;
const MAX_LIMIT: u32 = 100;

/// Normalized listing parameters. Out-of-range inputs fall back to defaults
/// instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Pagination {
    pub fn normalized(page: Option<i64>, limit: Option<i64>, search: Option<String>) -> Self {
        let page = match page {
            Some(p) if p > 0 => p as u32,
            _ => DEFAULT_PAGE,
        };
        let limit = match limit {
            Some(l) if l > 0 && l <= MAX_LIMIT as i64 => l as u32,
            _ => DEFAULT_LIMIT,
        };
        let search = search.filter(|s| !s.is_empty());
        Pagination {
            page,
            limit,
            search,
        }
    }

    pub fn offset(&self) -> u32 {
        self.limit * (self.page - 1)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageInfo {
    pub total: u64,
    pub current_page: u32,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
    pub last_page: u32,
    pub per_page: u32,
}

impl PageInfo {
    pub fn compute(total: u64, page: u32, limit: u32) -> Self {
        let last_page = total.div_ceil(limit as u64) as u32;
        PageInfo {
            total,
            current_page: page,
            next_page: if page + 1 > last_page {
                None
            } else {
                Some(page + 1)
            },
            prev_page: if page <= 1 { None } else { Some(page - 1) },
            last_page,
            per_page: limit,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Paginated<T> {
    pub info: PageInfo,
    pub data: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_out_of_range_inputs() {
        let p = Pagination::normalized(Some(0), Some(500), Some(String::new()));
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
        assert_eq!(p.search, None);

        let p = Pagination::normalized(Some(3), Some(50), Some("rust".into()));
        assert_eq!(p.page, 3);
        assert_eq!(p.limit, 50);
        assert_eq!(p.offset(), 100);
        assert_eq!(p.search.as_deref(), Some("rust"));
    }

    #[test]
    fn page_info_edges() {
        let info = PageInfo::compute(41, 1, 20);
        assert_eq!(info.last_page, 3);
        assert_eq!(info.next_page, Some(2));
        assert_eq!(info.prev_page, None);

        let info = PageInfo::compute(41, 3, 20);
        assert_eq!(info.next_page, None);
        assert_eq!(info.prev_page, Some(2));

        let info = PageInfo::compute(0, 1, 20);
        assert_eq!(info.last_page, 0);
        assert_eq!(info.next_page, None);
    }
}
