//! Pagination parameters for list operations.

/// 1-based page selection with a clamped page size.
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    /// Convert to a 0-based page index and a page size within bounds.
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, 200);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, per_page: 20 }
    }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn zero_page_becomes_first() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn per_page_clamped() {
        let (idx, per) = Pagination { page: 3, per_page: 10_000 }.normalize();
        assert_eq!(idx, 2);
        assert_eq!(per, 200);
    }
}
