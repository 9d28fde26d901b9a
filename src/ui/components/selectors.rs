//! Selector panel component renderer.
//!
//! Renders the title dropdown and the dependent platform, region and edition
//! dropdowns as one line each, followed by the Confirm and Close buttons.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SelectorInfo;

/// Renders one selector line at `row`.
///
/// The selected option is highlighted; a disabled selector is drawn in the
/// disabled color with its options hidden.
pub fn render_selector(out: &mut String, row: usize, selector: &SelectorInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    out.push_str(Theme::bold());
    out.push_str(&Theme::fg(&theme.colors.header_fg));
    out.push_str(&format!("{:<10}", selector.label));
    out.push_str(Theme::reset());

    if selector.disabled {
        out.push_str(&Theme::fg(&theme.colors.disabled_fg));
        out.push_str("--");
        out.push_str(Theme::reset());
        return row + 1;
    }

    let mut used = 10;
    for option in &selector.options {
        let text = format!(" {}={} ", option.value, option.label);
        let len = text.chars().count();
        if used + len > cols {
            out.push_str(&Theme::fg(&theme.colors.text_dim));
            out.push('…');
            break;
        }
        if selector.selected.as_deref() == Some(option.value.as_str()) {
            out.push_str(&Theme::fg(&theme.colors.selection_fg));
            out.push_str(&Theme::bg(&theme.colors.selection_bg));
        } else {
            out.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        out.push_str(&text);
        out.push_str(Theme::reset());
        used += len;
    }

    out.push_str(Theme::reset());
    row + 1
}

/// Renders the Confirm and Close buttons at `row`.
pub fn render_buttons(out: &mut String, row: usize, can_confirm: bool, can_close: bool, theme: &Theme, cols: usize) -> usize {
    position_cursor(out, row, 1);
    for (label, enabled) in [("[ Confirm ]", can_confirm), ("[ Close ]", can_close)] {
        let color = if enabled {
            &theme.colors.accent_fg
        } else {
            &theme.colors.disabled_fg
        };
        out.push_str(&Theme::fg(color));
        out.push_str(&truncate(label, cols));
        out.push(' ');
    }
    out.push_str(Theme::reset());
    row + 1
}
