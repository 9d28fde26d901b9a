//! Header component renderer.
//!
//! Renders the title bar with centered text, theme-aware colors and optional
//! background styling, followed by the committed release when there is one.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row`.
///
/// Returns the next available row: `row + 1`, or `row + 2` when a release
/// line is shown.
///
/// # Layout
///
/// ```text
/// [left padding] TITLE [right padding]
/// [left padding] release [right padding]
/// ```
pub fn render_header(out: &mut String, row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        out.push_str(&Theme::bg(bg));
    }
    push_centered(out, &header.title, cols);
    out.push_str(Theme::reset());

    let Some(release) = &header.release else {
        return row + 1;
    };

    position_cursor(out, row + 1, 1);
    out.push_str(&Theme::fg(&theme.colors.text_normal));
    push_centered(out, &truncate(release, cols), cols);
    out.push_str(Theme::reset());
    row + 2
}

/// Writes `text` centered in a line of `cols` characters.
pub(super) fn push_centered(out: &mut String, text: &str, cols: usize) {
    let len = text.chars().count().min(cols);
    let padding = cols.saturating_sub(len) / 2;
    out.push_str(&" ".repeat(padding));
    out.push_str(text);
    out.push_str(&" ".repeat(cols.saturating_sub(padding + len)));
}
