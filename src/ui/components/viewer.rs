//! Case viewer component renderer.
//!
//! Renders the mode selector and the current face of the case: descriptive
//! lines, image slots (URL or placeholder) and the image viewer caption with
//! its zoom level.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ModeOption, ViewerInfo};
use std::fmt::Write;

/// Renders the mode buttons on one line.
pub fn render_mode_selector(out: &mut String, row: usize, modes: &[ModeOption], theme: &Theme) -> usize {
    position_cursor(out, row, 1);
    for mode in modes {
        if mode.active {
            out.push_str(Theme::bold());
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        let _ = write!(out, " {} {} ", mode.key, mode.label);
        out.push_str(Theme::reset());
        out.push(' ');
    }
    row + 1
}

/// Renders the viewer starting at `row`. Returns the next available row.
pub fn render_viewer(out: &mut String, row: usize, viewer: &ViewerInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    if let Some(overlay) = &viewer.image_viewer {
        position_cursor(out, current_row, 1);
        out.push_str(Theme::bold());
        out.push_str(&Theme::fg(&theme.colors.accent_fg));
        let caption = if overlay.caption.is_empty() {
            viewer.mode.label().to_string()
        } else {
            overlay.caption.clone()
        };
        out.push_str(&truncate(&format!("[{caption}]  zoom {}x", overlay.zoom), cols));
        out.push_str(Theme::reset());
        current_row += 1;
    }

    for image in &viewer.images {
        position_cursor(out, current_row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        let _ = write!(out, "{:<12}", image.label);
        match &image.url {
            Some(url) => {
                out.push_str(&Theme::fg(&theme.colors.accent_fg));
                out.push_str(&truncate(url, cols.saturating_sub(12)));
            }
            None => {
                out.push_str(&Theme::fg(&theme.colors.disabled_fg));
                out.push_str("[ image unavailable ]");
            }
        }
        out.push_str(Theme::reset());
        current_row += 1;
    }

    for line in &viewer.lines {
        position_cursor(out, current_row, 1);
        out.push_str(&Theme::fg(&theme.colors.text_normal));
        out.push_str(&truncate(line, cols));
        out.push_str(Theme::reset());
        current_row += 1;
    }

    current_row
}
