/// Pagination query parameters
#[derive(Debug, Clone, Copy)]
pub struct PaginationParams {
    pub page: u32,
    pub limit: u32,
}

impl PaginationParams {
    /// Clamp raw query values into a sane window (page >= 1, 1 <= limit <= 100).
    pub fn clamped(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(20).clamp(1, 100),
        }
    }

    /// Offset into the full result set for SQL-style paging.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// Paginated response wrapper
#[derive(Debug)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = ((total as f64) / (limit as f64)).ceil() as u32;
        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Map the items while keeping the paging envelope.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        let r = PaginatedResult::new(vec![1, 2, 3], 21, 1, 10);
        assert_eq!(r.total_pages, 3);
    }

    #[test]
    fn total_pages_exact_division() {
        let r = PaginatedResult::new(vec![0u8; 10], 20, 2, 10);
        assert_eq!(r.total_pages, 2);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let r: PaginatedResult<String> = PaginatedResult::new(vec![], 0, 1, 10);
        assert_eq!(r.total_pages, 0);
        assert!(r.items.is_empty());
    }

    #[test]
    fn clamped_defaults() {
        let p = PaginationParams::clamped(None, None);
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 20);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn clamped_bounds() {
        let p = PaginationParams::clamped(Some(0), Some(1000));
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, 100);

        let p = PaginationParams::clamped(Some(3), Some(25));
        assert_eq!(p.offset(), 50);
    }

    #[test]
    fn map_keeps_envelope() {
        let r = PaginatedResult::new(vec![1, 2], 2, 1, 20).map(|n| n * 10);
        assert_eq!(r.items, vec![10, 20]);
        assert_eq!(r.total, 2);
        assert_eq!(r.total_pages, 1);
    }
}
