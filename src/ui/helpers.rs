//! Shared rendering and formatting utilities.
//!
//! Low-level helpers used by the view model computation and the component
//! renderers: cursor positioning into a frame buffer, width-aware truncation,
//! and the manual spread to page mapping.
//!
//! # Example
//!
//! ```rust
//! use game_library::ui::helpers::{spread_pages, truncate};
//!
//! assert_eq!(truncate("Grand Theft Auto V", 8), "Grand T…");
//! assert_eq!(spread_pages(1, 6), (None, Some(1)));
//! assert_eq!(spread_pages(2, 6), (Some(2), Some(3)));
//! ```

use crate::catalog::AssetUrls;
use crate::domain::ReleaseRecord;
use chrono::NaiveDate;
use std::fmt::Write;

/// Positions the cursor at a specific row and column.
///
/// Writes the ANSI sequence `\u{1b}[{row};{col}H` into `out`. Coordinates are
/// 1-indexed.
pub fn position_cursor(out: &mut String, row: usize, col: usize) {
    let _ = write!(out, "\u{1b}[{row};{col}H");
}

/// Cuts `text` to at most `width` characters, marking the cut with `…`.
///
/// Counts characters, not bytes.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Truncates then left-aligns `text` in a column of `width` characters.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(cut.chars().count());
    format!("{cut}{}", " ".repeat(pad))
}

/// Release date as shown in the table.
#[must_use]
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "N/A".to_string(), |date| date.format("%Y-%m-%d").to_string())
}

/// One-line description of a release.
#[must_use]
pub fn release_label(release: &ReleaseRecord) -> String {
    format!(
        "{} - {} / {} / {}",
        release.title,
        release.platform.label(),
        release.region.label(),
        release.edition.label()
    )
}

/// Pages visible on manual spread `spread` (1-based) of a `page_count` page
/// manual, as `(left, right)`.
///
/// The first spread shows the front page alone, later spreads pair an even
/// page with the following odd page, and the last spread shows the back page
/// alone when the count is even.
#[must_use]
pub fn spread_pages(spread: u32, page_count: u32) -> (Option<u32>, Option<u32>) {
    if spread == 0 || page_count == 0 {
        return (None, None);
    }
    let left = 2 * (spread - 1);
    let right = 2 * spread - 1;
    (
        (1..=page_count).contains(&left).then_some(left),
        (right <= page_count).then_some(right),
    )
}

/// Resolved URL of manual page `page` (1-based), if the image exists.
///
/// Odd pages are leaf fronts, even pages leaf backs.
#[must_use]
pub fn manual_page_url(assets: &AssetUrls, page: u32) -> Option<String> {
    let leaf = usize::try_from((page.checked_sub(1)?) / 2).ok()?;
    let (front, back) = assets.manual_leaves.get(leaf)?;
    if page % 2 == 1 {
        front.clone()
    } else {
        back.clone()
    }
}
