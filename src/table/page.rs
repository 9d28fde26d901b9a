//! Page window over the filtered, sorted rows.

use std::ops::Range;

/// Page sizes offered by the rows-per-page selector.
pub const PAGE_SIZES: [usize; 2] = [10, 20];

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = PAGE_SIZES[0];

/// Rows per page and the current 1-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page_size: usize,
    page: usize,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageWindow {
    /// Creates a window on page 1. A zero page size is raised to one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
        }
    }

    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Changes the page size and returns to page 1.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Returns to page 1.
    pub fn reset(&mut self) {
        self.page = 1;
    }

    /// Number of pages needed for `count` rows. Zero when there are no rows.
    #[must_use]
    pub const fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size)
    }

    /// Moves to `page` when it lies in `[1, total_pages]`.
    ///
    /// Returns `false` and leaves the window unchanged otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_library::table::PageWindow;
    ///
    /// let mut window = PageWindow::new(10);
    /// assert!(window.go_to(3, 3));
    /// assert!(!window.go_to(4, 3));
    /// assert_eq!(window.page(), 3);
    /// ```
    pub fn go_to(&mut self, page: usize, total_pages: usize) -> bool {
        if (1..=total_pages).contains(&page) {
            self.page = page;
            true
        } else {
            tracing::debug!(page = page, total_pages = total_pages, "ignoring out-of-range page");
            false
        }
    }

    /// Page actually shown for `count` rows: the current page clipped to
    /// `[1, total_pages]`, or 1 when there are no rows.
    #[must_use]
    pub fn effective_page(&self, count: usize) -> usize {
        self.page.clamp(1, self.total_pages(count).max(1))
    }

    /// Index range of the visible rows, clipped to `count`.
    #[must_use]
    pub fn range(&self, count: usize) -> Range<usize> {
        let start = ((self.effective_page(count) - 1) * self.page_size).min(count);
        let end = (start + self.page_size).min(count);
        start..end
    }
}

/// Footer summary of the pagination state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationSummary {
    /// 1-based index of the first visible row, 0 when empty.
    pub from: usize,
    /// 1-based index of the last visible row.
    pub to: usize,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl PaginationSummary {
    #[must_use]
    pub fn new(window: &PageWindow, count: usize) -> Self {
        let range = window.range(count);
        Self {
            from: if count == 0 { 0 } else { range.start + 1 },
            to: range.end,
            total: count,
            page: window.effective_page(count),
            total_pages: window.total_pages(count),
            page_size: window.page_size(),
        }
    }

    /// "Showing {from} to {to} of {total} entries".
    #[must_use]
    pub fn entries_text(&self) -> String {
        format!("Showing {} to {} of {} entries", self.from, self.to, self.total)
    }

    /// "Page {page} of {total_pages}", never showing zero pages.
    #[must_use]
    pub fn page_text(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages.max(1))
    }

    #[must_use]
    pub const fn can_go_back(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn can_go_forward(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_five_rows_make_three_pages() {
        let mut window = PageWindow::new(10);
        assert_eq!(window.total_pages(25), 3);
        assert!(window.go_to(3, 3));
        assert_eq!(window.range(25), 20..25);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut window = PageWindow::new(10);
        assert!(!window.go_to(0, 3));
        assert!(!window.go_to(4, 3));
        assert!(!window.go_to(1, 0));
        assert_eq!(window.page(), 1);
    }

    #[test]
    fn page_size_change_resets_page() {
        let mut window = PageWindow::new(10);
        window.go_to(2, 3);
        window.set_page_size(20);
        assert_eq!((window.page(), window.page_size()), (1, 20));
    }

    #[test]
    fn range_is_clipped_when_rows_shrink() {
        let mut window = PageWindow::new(10);
        window.go_to(3, 3);
        assert_eq!(window.effective_page(12), 2);
        assert_eq!(window.range(12), 10..12);
        assert_eq!(window.range(0), 0..0);
    }

    #[test]
    fn summary_text() {
        let mut window = PageWindow::new(10);
        window.go_to(3, 3);
        let summary = PaginationSummary::new(&window, 25);
        assert_eq!(summary.entries_text(), "Showing 21 to 25 of 25 entries");
        assert_eq!(summary.page_text(), "Page 3 of 3");
        assert!(summary.can_go_back());
        assert!(!summary.can_go_forward());

        let empty = PaginationSummary::new(&PageWindow::default(), 0);
        assert_eq!(empty.entries_text(), "Showing 0 to 0 of 0 entries");
        assert_eq!(empty.page_text(), "Page 1 of 1");
        assert!(!empty.can_go_back());
        assert!(!empty.can_go_forward());
    }
}
