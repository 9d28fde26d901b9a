//! Composable UI component renderers.
//!
//! Each component writes one part of the interface into a frame buffer at a
//! given row and returns the next free row, so layouts are simple sequences
//! of calls.
//!
//! # Components
//!
//! - `header`: Title bar and committed release
//! - `footer`: Keybinding hints and error line
//! - `table`: Release table, filters and pagination
//! - `selectors`: Title / platform / region / edition dropdowns and buttons
//! - `viewer`: Mode selector and the current face of the case
//! - `empty`: "No results found" message
//!
//! # Layout Modes
//!
//! - [`render_catalog_layout`]: Header + Table + Selectors + Footer
//! - [`render_viewer_layout`]: Header + Mode selector + Viewer + Footer

mod empty;
mod footer;
mod header;
mod selectors;
mod table;
mod viewer;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{CatalogPanel, UIViewModel};

use empty::render_empty_state;
use footer::{render_error, render_footer};
use header::render_header;
use selectors::{render_buttons, render_selector};
use table::{render_filters, render_pagination, render_table_headers, render_table_rows};
use viewer::{render_mode_selector, render_viewer};

/// Renders a horizontal border line at `row`. Returns `row + 1`.
fn render_border(out: &mut String, row: usize, color: &str, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(color));
    out.push_str(&"─".repeat(cols));
    out.push_str(Theme::reset());
    row + 1
}

/// Renders the footer block anchored to the bottom of the screen.
fn render_bottom(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let footer_row = rows.max(4);
    let border_row = footer_row - 1;

    if let Some(message) = &vm.error {
        render_error(out, border_row - 1, message, theme, cols);
    }
    render_border(out, border_row, &theme.colors.border, cols);
    render_footer(out, footer_row, &vm.footer, theme, cols);
}

/// Renders the title selection panel.
///
/// Layout structure:
/// ```text
/// [Header]
/// [Border]
/// [Filters]
/// [Table Headers]
/// [Table Rows | Empty State | Loading]
/// [Pagination]
/// [Border]
/// [Title / Platform / Region / Edition]
/// [Confirm] [Close]
/// ...
/// [Error]
/// [Border]
/// [Footer]
/// ```
pub fn render_catalog_layout(out: &mut String, vm: &UIViewModel, panel: &CatalogPanel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_filters(out, current_row, &panel.filters, theme, cols);
    current_row = render_table_headers(out, current_row, &panel.columns, theme);

    if panel.loading {
        position_cursor(out, current_row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_dim));
        out.push_str("Loading...");
        out.push_str(Theme::reset());
        current_row += 1;
    } else if let Some(empty) = &panel.empty_state {
        current_row = render_empty_state(out, current_row, empty, theme, cols);
    } else {
        current_row = render_table_rows(out, current_row, &panel.rows, theme, cols);
    }

    current_row = render_pagination(out, current_row, &panel.pagination, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);

    current_row = render_selector(out, current_row, &panel.title_selector, theme, cols);
    for selector in &panel.selectors {
        current_row = render_selector(out, current_row, selector, theme, cols);
    }
    let _current_row = render_buttons(out, current_row, panel.can_confirm, panel.can_close, theme, cols);

    render_bottom(out, vm, theme, cols, rows);
}

/// Renders the case viewer.
///
/// Layout structure:
/// ```text
/// [Header]
/// [Border]
/// [Mode selector]
/// [Viewer caption, images and lines]
/// ...
/// [Error]
/// [Border]
/// [Footer]
/// ```
pub fn render_viewer_layout(out: &mut String, vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 1;

    current_row = render_header(out, current_row, &vm.header, theme, cols);
    current_row = render_border(out, current_row, &theme.colors.border, cols);
    current_row = render_mode_selector(out, current_row, &vm.mode_selector, theme);
    let _current_row = render_viewer(out, current_row + 1, &vm.viewer, theme, cols);

    render_bottom(out, vm, theme, cols, rows);
}
