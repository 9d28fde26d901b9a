//! Release table component renderer.
//!
//! Renders the catalog as a six-column table (title, platform, region,
//! edition, release date, genres) with the sort arrow on the sorted column,
//! colored genre badges, the active filters and the pagination summary.

use crate::table::PaginationSummary;
use crate::ui::helpers::{fit, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnHeader, DisplayRow};
use std::fmt::Write;

/// Fixed widths of the first five columns; genres take the rest.
const COLUMN_WIDTHS: [usize; 5] = [28, 16, 15, 12, 13];

/// Width of the row index gutter.
const INDEX_WIDTH: usize = 4;

/// Renders the active filters as one dimmed line, if any.
pub fn render_filters(out: &mut String, row: usize, filters: &[(String, String)], theme: &Theme, cols: usize) -> usize {
    if filters.is_empty() {
        return row;
    }
    let text = filters
        .iter()
        .map(|(column, value)| format!("{column}: {value}"))
        .collect::<Vec<_>>()
        .join("  ");

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&truncate(&format!("Filters  {text}"), cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the column headers at `row`. Returns `row + 1`.
pub fn render_table_headers(out: &mut String, row: usize, columns: &[ColumnHeader], theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&" ".repeat(INDEX_WIDTH));

    for (i, column) in columns.iter().enumerate() {
        let label = match column.indicator {
            Some(indicator) => format!("{} {indicator}", column.label),
            None => column.label.to_string(),
        };
        match COLUMN_WIDTHS.get(i) {
            Some(width) => out.push_str(&fit(&label, *width)),
            None => out.push_str(&label),
        }
    }

    out.push_str(Theme::reset());
    row + 1
}

/// Renders every row starting at `row`. Returns the next available row.
pub fn render_table_rows(out: &mut String, row: usize, rows: &[DisplayRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in rows {
        current_row = render_table_row(out, current_row, item, theme, cols);
    }
    current_row
}

/// Renders one release.
///
/// # Layout
///
/// ```text
/// [index] TITLE  PLATFORM  REGION  EDITION  DATE  [badge] [badge]
/// ```
fn render_table_row(out: &mut String, row: usize, item: &DisplayRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);

    out.push_str(&Theme::fg(&theme.colors.text_dim));
    out.push_str(&fit(&item.index.to_string(), INDEX_WIDTH));
    out.push_str(&Theme::fg(&theme.colors.text_normal));

    let cells = [&item.title, &item.platform, &item.region, &item.edition, &item.release_date];
    for (cell, width) in cells.into_iter().zip(COLUMN_WIDTHS) {
        out.push_str(&fit(cell, width.saturating_sub(1)));
        out.push(' ');
    }

    let mut used = INDEX_WIDTH + COLUMN_WIDTHS.iter().sum::<usize>();
    for badge in &item.genres {
        let len = badge.name.chars().count() + 1;
        if used + len > cols {
            break;
        }
        let _ = write!(out, "{}{} ", Theme::fg(&badge.color), badge.name);
        used += len;
    }

    out.push_str(Theme::reset());
    row + 1
}

/// Renders the pagination line at `row`.
///
/// ```text
/// Showing 11 to 20 of 25 entries          Page 2 of 3  [10 per page]
/// ```
pub fn render_pagination(out: &mut String, row: usize, summary: &PaginationSummary, theme: &Theme, cols: usize) -> usize {
    let left = summary.entries_text();
    let arrows = format!(
        "{} {} {} {}",
        if summary.can_go_back() { "«" } else { " " },
        if summary.can_go_back() { "‹" } else { " " },
        if summary.can_go_forward() { "›" } else { " " },
        if summary.can_go_forward() { "»" } else { " " },
    );
    let right = format!("{}  {arrows}  [{} per page]", summary.page_text(), summary.page_size);

    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    let gap = cols.saturating_sub(left.chars().count() + right.chars().count()).max(2);
    let line = format!("{left}{}{right}", " ".repeat(gap));
    out.push_str(&truncate(&line, cols));
    out.push_str(Theme::reset());
    row + 1
}
