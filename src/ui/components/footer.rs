//! Footer component renderer.
//!
//! Renders the keybinding hints and, above them, the last fetch error.

use super::header::push_centered;
use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the footer help bar at `row`.
///
/// Hints are centered and dimmed. Text wider than the terminal is truncated
/// so the layout never wraps.
pub fn render_footer(out: &mut String, row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(&Theme::fg(&theme.colors.text_dim));
    push_centered(out, &truncate(&footer.keybindings, cols), cols);
    out.push_str(Theme::reset());
    row + 1
}

/// Renders a fetch error line at `row`.
pub fn render_error(out: &mut String, row: usize, message: &str, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.error_fg));
    let line = truncate(&format!("! {message}"), cols);
    out.push_str(&line);
    out.push_str(&" ".repeat(cols.saturating_sub(line.chars().count())));
    out.push_str(Theme::reset());
    row + 1
}
