//! Filter / sort / paginate engine for the release table.
//!
//! [`compute_visible_rows`] is a pure transform of the catalog snapshot and
//! the three pieces of table state. It is re-run whenever any input changes;
//! nothing is cached between calls.
//!
//! # Modules
//!
//! - `filter`: [`FilterCriteria`] and [`DateRange`]
//! - `sort`: [`SortSpec`], [`SortKey`] and [`SortDirection`]
//! - `page`: [`PageWindow`] and [`PaginationSummary`]

pub mod filter;
pub mod page;
pub mod sort;

pub use filter::{DateRange, FilterCriteria, TextColumn};
pub use page::{PageWindow, PaginationSummary, DEFAULT_PAGE_SIZE, PAGE_SIZES};
pub use sort::{SortDirection, SortKey, SortSpec};

use crate::domain::ReleaseRecord;

/// Visible slice of the release table.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage<'a> {
    pub rows: Vec<&'a ReleaseRecord>,
    /// Zero when nothing matches.
    pub total_pages: usize,
    pub filtered_count: usize,
    /// Page actually shown, clipped to the available range.
    pub page: usize,
}

impl TablePage<'_> {
    /// Whether the table should show its "no results" state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }
}

/// Filters and sorts the catalog without paginating.
#[must_use]
pub fn filter_and_sort<'a>(
    catalog: &'a [ReleaseRecord],
    filters: &FilterCriteria,
    sort: &SortSpec,
) -> Vec<&'a ReleaseRecord> {
    let mut rows: Vec<&ReleaseRecord> = catalog.iter().filter(|record| filters.matches(record)).collect();
    sort.sort(&mut rows);
    rows
}

/// Computes the rows visible for the current table state.
///
/// # Examples
///
/// ```
/// use game_library::domain::ReleaseRecord;
/// use game_library::table::{compute_visible_rows, FilterCriteria, PageWindow, SortSpec};
///
/// let catalog = vec![
///     ReleaseRecord::new(1, "Fallout 4", "ps4", "us", "std"),
///     ReleaseRecord::new(2, "Mafia", "pc", "eur", "std"),
/// ];
/// let filters = FilterCriteria { title: "fall".into(), ..FilterCriteria::default() };
///
/// let page = compute_visible_rows(&catalog, &filters, &SortSpec::default(), &PageWindow::default());
/// assert_eq!(page.rows.len(), 1);
/// assert_eq!(page.rows[0].title, "Fallout 4");
/// assert_eq!(page.total_pages, 1);
/// ```
#[must_use]
pub fn compute_visible_rows<'a>(
    catalog: &'a [ReleaseRecord],
    filters: &FilterCriteria,
    sort: &SortSpec,
    window: &PageWindow,
) -> TablePage<'a> {
    let _span = tracing::trace_span!("compute_visible_rows", catalog = catalog.len()).entered();

    let mut rows = filter_and_sort(catalog, filters, sort);
    let filtered_count = rows.len();
    let range = window.range(filtered_count);

    rows.truncate(range.end);
    rows.drain(..range.start);

    TablePage {
        rows,
        total_pages: window.total_pages(filtered_count),
        filtered_count,
        page: window.effective_page(filtered_count),
    }
}
