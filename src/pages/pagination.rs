//! Page number / page size window shared by the paginated views.

/// Largest page size the backend accepts.
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    total: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            total: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages for the last known total; never less than one.
    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Record the total reported by the last fetch. Returns whether the page
    /// had to be pulled back, in which case the rows on hand are stale.
    pub fn set_total(&mut self, total: u64) -> bool {
        self.total = total;
        let clamped = self.page.min(self.total_pages());
        let moved = clamped != self.page;
        self.page = clamped;
        moved
    }

    /// Move to `page`, clamped to `[1, total_pages]`. Returns whether it moved.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages());
        let moved = target != self.page;
        self.page = target;
        moved
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    pub fn prev(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Back to the first page, as after any filter change.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let mut p = Pagination::new(20);
        assert_eq!(p.total_pages(), 1);
        p.set_total(20);
        assert_eq!(p.total_pages(), 1);
        p.set_total(21);
        assert_eq!(p.total_pages(), 2);
        p.set_total(95);
        assert_eq!(p.total_pages(), 5);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut p = Pagination::new(10);
        p.set_total(35);

        assert!(!p.prev());
        assert_eq!(p.page(), 1);

        assert!(p.go_to(9));
        assert_eq!(p.page(), 4);
        assert!(!p.next());
        assert_eq!(p.page(), 4);

        assert!(p.go_to(0));
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_shrinking_total_pulls_page_back() {
        let mut p = Pagination::new(10);
        assert!(!p.set_total(50));
        p.go_to(5);
        assert!(p.set_total(12));
        assert_eq!(p.page(), 2);
        assert!(!p.set_total(12));
    }

    #[test]
    fn test_page_size_is_bounded_and_resets_page() {
        let mut p = Pagination::new(0);
        assert_eq!(p.page_size(), 1);

        p.set_total(500);
        p.go_to(3);
        p.set_page_size(1000);
        assert_eq!(p.page_size(), MAX_PAGE_SIZE);
        assert_eq!(p.page(), 1);
    }
}
