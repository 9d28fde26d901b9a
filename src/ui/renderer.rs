//! Top-level rendering coordinator.
//!
//! This module provides the main rendering entry point, coordinating view model
//! computation and delegation to UI components. It chooses between the catalog
//! panel and the case viewer layouts.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! # Example
//!
//! ```rust
//! use game_library::app::AppState;
//! use game_library::ui::{render, Theme};
//!
//! let state = AppState::new(Theme::default(), 10);
//! let frame = render(&state, 24, 100);
//! assert!(frame.contains("Game Library"));
//! ```

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// ANSI sequence clearing the screen and homing the cursor.
const CLEAR_SCREEN: &str = "\u{1b}[2J\u{1b}[H";

/// Renders the UI into an ANSI frame.
///
/// Computes the view model from application state and delegates to the
/// matching layout. The frame starts with a screen clear; the caller writes it
/// to the terminal.
#[must_use]
pub fn render(state: &AppState, rows: usize, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel();

    render_viewmodel(&viewmodel, &state.theme, rows, cols)
}

/// Renders a view model with the layout it calls for.
///
/// - Catalog panel open: Header, table, selectors, footer
/// - Otherwise: Header, mode selector, viewer, footer
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) -> String {
    let mut out = String::from(CLEAR_SCREEN);

    if let Some(panel) = &vm.panel {
        components::render_catalog_layout(&mut out, vm, panel, theme, cols, rows);
    } else {
        components::render_viewer_layout(&mut out, vm, theme, cols, rows);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_event, Event};
    use crate::domain::ReleaseRecord;
    use crate::worker::WorkerResponse;

    #[test]
    fn empty_catalog_renders_no_results() {
        let state = AppState::new(Theme::default(), 10);
        let frame = render(&state, 30, 120);
        assert!(frame.contains("No results found"));
        assert!(frame.contains("Showing 0 to 0 of 0 entries"));
    }

    #[test]
    fn loading_catalog_renders_placeholder() {
        let mut state = AppState::new(Theme::default(), 10);
        handle_event(&mut state, &Event::Start).unwrap();
        let frame = render(&state, 30, 120);
        assert!(frame.contains("Loading..."));
        assert!(!frame.contains("No results found"));
    }

    #[test]
    fn rows_and_error_are_rendered() {
        let mut state = AppState::new(Theme::default(), 10);
        let mut release = ReleaseRecord::new(1, "Fallout 4", "ps4", "us", "std");
        release.genres = vec!["RPG".into()];
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::CatalogLoaded {
                releases: vec![release].into(),
            }),
        )
        .unwrap();
        state.error = Some("Unable to fetch game list: offline".into());

        let frame = render(&state, 30, 140);
        assert!(frame.contains("Fallout 4"));
        assert!(frame.contains("PlayStation 4"));
        assert!(frame.contains(&Theme::fg("#8a2be2")));
        assert!(frame.contains("Unable to fetch game list: offline"));
    }

    #[test]
    fn closed_panel_renders_viewer() {
        let mut state = AppState::new(Theme::default(), 10);
        state.view.catalog_panel_open = false;
        let frame = render(&state, 30, 120);
        assert!(frame.contains("The case is closed."));
        assert!(frame.contains("CASE"));
        assert!(!frame.contains("ADDITIONAL"));
    }
}
