//! Page bounds for previous/next navigation.

use moviefinder_api::tmdb::MAX_PAGE;

/// 1-based page cursor bounded by the last known total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (>= 1).
    page: u32,
    /// Total pages (1..=`MAX_PAGE`).
    total_pages: u32,
}

impl Pagination {
    /// Page 1 of 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }

    /// Current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Total pages.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Whether "previous" would move.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether "next" would move.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Moves one page back, never below 1. Returns whether the page changed.
    pub const fn previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.page = self.page.saturating_sub(1);
        true
    }

    /// Moves one page forward, never above the total. Returns whether the
    /// page changed.
    pub const fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page = self.page.saturating_add(1);
        true
    }

    /// Returns to page 1. Returns whether the page changed.
    pub const fn reset(&mut self) -> bool {
        let changed = self.page != 1;
        self.page = 1;
        changed
    }

    /// Jumps to `page`, clamped into `1..=total`. Returns whether the page
    /// changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages);
        let changed = target != self.page;
        self.page = target;
        changed
    }

    /// Records the total reported by the API.
    ///
    /// Clamped into `1..=MAX_PAGE`: TMDB reports 0 for empty searches and
    /// refuses pages above 500 even when it reports more. A current page
    /// beyond the new total moves down to the last page.
    pub fn set_total(&mut self, total_pages: u32) {
        self.total_pages = total_pages.clamp(1, MAX_PAGE);
        self.page = self.page.min(self.total_pages);
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        // Arrange & Act
        let pagination = Pagination::default();

        // Assert
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.total_pages(), 1);
        assert!(!pagination.has_previous());
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_previous_never_goes_below_one() {
        // Arrange
        let mut pagination = Pagination::new();
        pagination.set_total(3);

        // Act & Assert
        assert!(!pagination.previous());
        assert_eq!(pagination.page(), 1);

        assert!(pagination.next());
        assert!(pagination.previous());
        assert!(!pagination.previous());
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_next_never_goes_above_total() {
        // Arrange
        let mut pagination = Pagination::new();
        pagination.set_total(5);

        // Act
        for _ in 0..10 {
            pagination.next();
        }

        // Assert
        assert_eq!(pagination.page(), 5);
        assert!(!pagination.has_next());
        assert!(!pagination.next());
        assert_eq!(pagination.page(), 5);
    }

    #[test]
    fn test_reset_reports_change() {
        // Arrange
        let mut pagination = Pagination::new();
        pagination.set_total(4);

        // Act & Assert
        assert!(!pagination.reset());
        pagination.next();
        pagination.next();
        assert!(pagination.reset());
        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.total_pages(), 4);
    }

    #[test]
    fn test_go_to_clamps_into_known_total() {
        // Arrange
        let mut pagination = Pagination::new();
        pagination.set_total(10);

        // Act & Assert
        assert!(pagination.go_to(4));
        assert_eq!(pagination.page(), 4);
        assert!(!pagination.go_to(4));
        assert!(pagination.go_to(99));
        assert_eq!(pagination.page(), 10);
        assert!(pagination.go_to(0));
        assert_eq!(pagination.page(), 1);
    }

    #[test]
    fn test_shrinking_total_pulls_page_down() {
        // Arrange
        let mut pagination = Pagination::new();
        pagination.set_total(10);
        pagination.go_to(7);

        // Act
        pagination.set_total(6);

        // Assert
        assert_eq!(pagination.page(), 6);
        assert_eq!(pagination.total_pages(), 6);
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_set_total_clamps() {
        // Arrange
        let mut pagination = Pagination::new();

        // Act & Assert
        pagination.set_total(0);
        assert_eq!(pagination.total_pages(), 1);

        pagination.set_total(48_213);
        assert_eq!(pagination.total_pages(), 500);

        pagination.set_total(7);
        assert_eq!(pagination.total_pages(), 7);
    }
}
