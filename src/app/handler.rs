//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input
//! and worker responses, translating them into state changes and action
//! sequences. It is the only place where [`AppState`] is mutated.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the driver (user commands) or the worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! Events fall into several categories:
//! - **Table**: `FilterText`, `FilterGenre`, `FilterDates`, `SortBy`, paging, `RowClicked`
//! - **Selection**: `SelectTitle`, `SelectOption`, `ConfirmSelection`
//! - **View**: `SelectMode`, `Interact`, `Inspect`, manual paging, zoom, `Escape`
//! - **System**: `Start`, `DismissError`, `Quit`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use game_library::app::{handle_event, AppState, Event};
//! use game_library::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), 10);
//! let (render, actions) = handle_event(&mut state, &Event::Start)?;
//! assert!(render);
//! assert_eq!(actions.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::app::actions::SoundCue;
use crate::app::modes::ViewMode;
use crate::app::{Action, AppState};
use crate::domain::error::{GameLibraryError, Result};
use crate::domain::GameId;
use crate::selection::{self, SelectionLevel, TitleChoice};
use crate::table::{DateRange, FilterCriteria, SortKey, TextColumn, PAGE_SIZES};
use crate::worker::{FetchScope, WorkerMessage, WorkerResponse};
use std::sync::Arc;

/// Events triggered by user input or worker responses.
///
/// Each event represents a discrete occurrence that may cause state changes
/// and action emissions. The event handler processes these sequentially,
/// ensuring deterministic state transitions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Requests the catalog and the game list.
    Start,

    /// Replaces the substring rule of one text column.
    FilterText {
        column: TextColumn,
        value: String,
    },
    /// Replaces the genre rule. Empty clears it.
    FilterGenre(String),
    FilterDates(DateRange),
    ClearFilters,

    /// Header click on a column.
    SortBy(SortKey),

    /// Chooses one of the offered page sizes.
    SetPageSize(usize),
    GoToPage(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,

    /// Click on a row of the visible page, by position.
    RowClicked(usize),

    /// Title selector change.
    SelectTitle(GameId),
    /// Platform, region or edition selector change. Empty clears the level.
    SelectOption {
        level: SelectionLevel,
        value: String,
    },
    /// Confirm button.
    ConfirmSelection,

    /// Tab: shows or hides the title selection panel.
    ToggleCatalogPanel,

    /// Mode selector button or keys `1`..=`5`.
    SelectMode(ViewMode),

    /// E: opens or closes the case, flips the cover in the cover viewer.
    Interact,

    /// Q: info box in Case mode, cover text in the cover viewer, image viewer
    /// in Manual mode.
    Inspect,

    /// Esc: closes the image viewer, then the panel.
    Escape,

    /// A: previous manual spread.
    PreviousManualPage,
    /// D: next manual spread.
    NextManualPage,

    ZoomIn,
    ZoomOut,
    ResetZoom,

    /// Hides the error line.
    DismissError,

    Quit,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the caller whether anything visible changed and a
/// render is due.
///
/// # Errors
///
/// Returns [`GameLibraryError::Selection`] for commands that reference
/// something that does not exist: an unknown game id, a row index past the
/// visible page, a selector value that is not offered, or an unsupported page
/// size. State is left unchanged in those cases.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Start => {
            state.loading.catalog = true;
            Ok((
                true,
                vec![
                    Action::PostToWorker(WorkerMessage::load_catalog()),
                    Action::PostToWorker(WorkerMessage::load_games()),
                ],
            ))
        }
        Event::FilterText { column, value } => {
            let changed = state.update_filters(|filters| filters.set_text(*column, value.trim()));
            Ok((changed, vec![]))
        }
        Event::FilterGenre(genre) => {
            let changed = state.update_filters(|filters| genre.trim().clone_into(&mut filters.genre));
            Ok((changed, vec![]))
        }
        Event::FilterDates(range) => {
            let changed = state.update_filters(|filters| filters.dates = *range);
            Ok((changed, vec![]))
        }
        Event::ClearFilters => {
            let changed = state.update_filters(|filters| *filters = FilterCriteria::default());
            Ok((changed, vec![]))
        }
        Event::SortBy(key) => {
            state.sort_by(*key);
            Ok((true, vec![]))
        }
        Event::SetPageSize(size) => {
            if !PAGE_SIZES.contains(size) {
                return Err(GameLibraryError::Selection(format!(
                    "page size {size} is not one of {PAGE_SIZES:?}"
                )));
            }
            state.window.set_page_size(*size);
            Ok((true, vec![]))
        }
        Event::GoToPage(page) => Ok((state.go_to_page(*page), vec![])),
        Event::FirstPage => Ok((state.go_to_page(1), vec![])),
        Event::PreviousPage => {
            let page = state.pagination().page.saturating_sub(1);
            Ok((state.go_to_page(page), vec![]))
        }
        Event::NextPage => {
            let page = state.pagination().page + 1;
            Ok((state.go_to_page(page), vec![]))
        }
        Event::LastPage => {
            let last = state.pagination().total_pages;
            Ok((state.go_to_page(last), vec![]))
        }
        Event::RowClicked(index) => handle_row_clicked(state, *index),
        Event::SelectTitle(game_id) => {
            if state.loading.releases.is_some() {
                tracing::debug!("releases loading, title selector disabled");
                return Ok((false, vec![]));
            }
            let choice = state.title_choice(*game_id)?;
            Ok((true, request_releases(state, choice)))
        }
        Event::SelectOption { level, value } => {
            if state.loading.releases.is_some() {
                tracing::debug!(level = %level, "releases loading, selector disabled");
                return Ok((false, vec![]));
            }
            let releases = Arc::clone(&state.releases);
            state.selection.set(*level, value, &releases)?;
            Ok((true, vec![]))
        }
        Event::ConfirmSelection => {
            if state.loading.releases.is_some() {
                return Ok((false, vec![]));
            }
            match selection::confirm_selection(&state.releases, &state.selection) {
                Some(committed) => Ok((true, vec![state.commit(committed)])),
                None => {
                    tracing::debug!("selection incomplete, confirm disabled");
                    Ok((false, vec![]))
                }
            }
        }
        Event::ToggleCatalogPanel => {
            if state.view.catalog_panel_open && !state.can_close_panel() {
                tracing::debug!("nothing committed yet, panel stays open");
                return Ok((false, vec![]));
            }
            state.view.catalog_panel_open = !state.view.catalog_panel_open;
            Ok((true, vec![]))
        }
        Event::SelectMode(mode) => {
            let additional = state.additional_available();
            Ok((state.view.enter_mode(*mode, additional), vec![]))
        }
        Event::Interact => match (state.view.mode, state.view.image_viewer_open) {
            (ViewMode::Case, _) => {
                let cue = state.view.toggle_case();
                Ok((true, vec![Action::sound(cue)]))
            }
            (ViewMode::Cover, true) => {
                state.view.cover_flipped = !state.view.cover_flipped;
                Ok((true, vec![Action::sound(SoundCue::CoverFlip)]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Inspect => match (state.view.mode, state.view.image_viewer_open) {
            (ViewMode::Case, _) => {
                state.view.info_box_visible = !state.view.info_box_visible;
                Ok((true, vec![]))
            }
            (ViewMode::Cover, true) => {
                state.view.cover_text_visible = !state.view.cover_text_visible;
                Ok((true, vec![]))
            }
            (ViewMode::Cover, false) | (ViewMode::Manual, _) => {
                state.view.toggle_image_viewer();
                Ok((true, vec![]))
            }
            _ => Ok((false, vec![])),
        },
        Event::Escape => {
            if state.view.image_viewer_open {
                state.view.toggle_image_viewer();
                return Ok((true, vec![]));
            }
            if state.view.catalog_panel_open && state.can_close_panel() {
                state.view.catalog_panel_open = false;
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::PreviousManualPage => {
            if state.view.mode != ViewMode::Manual || !state.view.previous_manual_page() {
                return Ok((false, vec![]));
            }
            Ok((true, vec![Action::sound(SoundCue::PageFlip)]))
        }
        Event::NextManualPage => {
            let page_count = state.manual_page_count();
            if state.view.mode != ViewMode::Manual || page_count == 0 || !state.view.next_manual_page(page_count) {
                return Ok((false, vec![]));
            }
            Ok((true, vec![Action::sound(SoundCue::PageFlip)]))
        }
        Event::ZoomIn => Ok((state.view.image_viewer_open && state.view.zoom_in(), vec![])),
        Event::ZoomOut => Ok((state.view.image_viewer_open && state.view.zoom_out(), vec![])),
        Event::ResetZoom => Ok((state.view.image_viewer_open && state.view.reset_zoom(), vec![])),
        Event::DismissError => Ok((state.error.take().is_some(), vec![])),
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Selects `choice` as the title and asks the worker for its releases.
fn request_releases(state: &mut AppState, choice: TitleChoice) -> Vec<Action> {
    let game_id = choice.game_id;
    state.selection.set_title(choice);
    state.releases = Arc::from(Vec::new());
    state.loading.releases = Some(game_id);
    vec![Action::PostToWorker(WorkerMessage::load_releases(game_id))]
}

fn handle_row_clicked(state: &mut AppState, index: usize) -> Result<(bool, Vec<Action>)> {
    if state.loading.releases.is_some() {
        tracing::debug!(index = index, "releases loading, ignoring row click");
        return Ok((false, vec![]));
    }

    let row = state
        .visible_rows()
        .rows
        .get(index)
        .map(|release| (*release).clone())
        .ok_or_else(|| GameLibraryError::Selection(format!("no row {index} on the current page")))?;

    tracing::debug!(index = index, game_id = row.game_id, "row clicked");

    if state.has_releases_for(row.game_id) {
        state.pending_row = Some(row);
        return Ok((true, apply_pending_row(state)));
    }

    let choice = TitleChoice {
        game_id: row.game_id,
        title: row.title.clone(),
    };
    state.pending_row = Some(row);
    Ok((true, request_releases(state, choice)))
}

/// Pre-fills the selectors from the clicked row and commits when the row
/// resolves to a release.
fn apply_pending_row(state: &mut AppState) -> Vec<Action> {
    let Some(row) = state.pending_row.take() else {
        return vec![];
    };

    let releases = Arc::clone(&state.releases);
    if !state.selection.prefill_from_row(&row, &releases) {
        return vec![];
    }

    selection::confirm_selection(&releases, &state.selection)
        .map(|committed| vec![state.commit(committed)])
        .unwrap_or_default()
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::CatalogLoaded { releases } => {
            tracing::debug!(release_count = releases.len(), "catalog received");
            state.catalog = Arc::clone(releases);
            state.window.reset();
            state.loading.catalog = false;
            state.error = None;
            Ok((true, vec![]))
        }
        WorkerResponse::GamesLoaded { games } => {
            state.games = Arc::clone(games);
            Ok((true, vec![]))
        }
        WorkerResponse::ReleasesLoaded { game_id, releases } => {
            if state.loading.releases != Some(*game_id) {
                tracing::debug!(game_id = game_id, "stale releases response, ignoring");
                return Ok((false, vec![]));
            }
            state.loading.releases = None;
            state.releases = Arc::clone(releases);

            let pending_matches = state.pending_row.as_ref().is_some_and(|row| row.game_id == *game_id);
            let actions = if pending_matches {
                apply_pending_row(state)
            } else {
                state.pending_row = None;
                vec![]
            };
            Ok((true, actions))
        }
        WorkerResponse::AssetsProbed {
            game_id,
            platform,
            region,
            edition,
            urls,
        } => {
            let current = state
                .committed
                .as_ref()
                .is_some_and(|committed| committed.release.key() == (*game_id, platform, region, edition));
            if !current {
                tracing::debug!(game_id = game_id, "assets for a replaced release, ignoring");
                return Ok((false, vec![]));
            }
            state.assets = urls.clone();
            Ok((true, vec![]))
        }
        WorkerResponse::Error { scope, message } => {
            tracing::warn!(scope = %scope, error = %message, "worker reported a failed fetch");
            match scope {
                FetchScope::Catalog => state.loading.catalog = false,
                FetchScope::Releases { game_id } => {
                    if state.loading.releases == Some(*game_id) {
                        state.loading.releases = None;
                        state.pending_row = None;
                    }
                }
                FetchScope::Games | FetchScope::Assets => {}
            }
            state.error = Some(message.clone());
            Ok((true, vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Game, IncludedItem, ReleaseRecord};
    use crate::ui::Theme;

    fn releases_of_a() -> Vec<ReleaseRecord> {
        let mut manual = ReleaseRecord::new(1, "A", "ps4", "us", "std");
        manual.included_items = vec![IncludedItem::Manual {
            page_width: Some(12.0),
            page_height: Some(18.0),
            page_count: 6,
        }];
        vec![
            manual,
            ReleaseRecord::new(1, "A", "ps4", "eur", "std"),
            ReleaseRecord::new(1, "A", "pc", "us", "std"),
        ]
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(Theme::default(), 10);
        let mut catalog = releases_of_a();
        catalog.push(ReleaseRecord::new(2, "B", "switch", "jp", "le"));
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::CatalogLoaded {
                releases: catalog.into(),
            }),
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::GamesLoaded {
                games: vec![
                    Game { id: 1, title: "A".into() },
                    Game { id: 2, title: "B".into() },
                ]
                .into(),
            }),
        )
        .unwrap();
        state
    }

    fn deliver_releases(state: &mut AppState, game_id: GameId, releases: Vec<ReleaseRecord>) -> Vec<Action> {
        let (_, actions) = handle_event(
            state,
            &Event::WorkerResponse(WorkerResponse::ReleasesLoaded {
                game_id,
                releases: releases.into(),
            }),
        )
        .unwrap();
        actions
    }

    fn commit_a_ps4_us(state: &mut AppState) {
        handle_event(state, &Event::SelectTitle(1)).unwrap();
        deliver_releases(state, 1, releases_of_a());
        for (level, value) in [
            (SelectionLevel::Platform, "ps4"),
            (SelectionLevel::Region, "us"),
            (SelectionLevel::Edition, "std"),
        ] {
            handle_event(state, &Event::SelectOption { level, value: value.into() }).unwrap();
        }
        let (_, actions) = handle_event(state, &Event::ConfirmSelection).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn start_requests_catalog_and_games() {
        let mut state = AppState::new(Theme::default(), 10);
        let (render, actions) = handle_event(&mut state, &Event::Start).unwrap();
        assert!(render);
        assert!(state.loading.catalog);
        assert_eq!(
            actions,
            vec![
                Action::PostToWorker(WorkerMessage::load_catalog()),
                Action::PostToWorker(WorkerMessage::load_games()),
            ]
        );
    }

    #[test]
    fn catalog_reload_returns_to_first_page() {
        let mut state = AppState::new(Theme::default(), 10);
        let catalog = |count: GameId| -> Vec<ReleaseRecord> {
            (1..=count).map(|id| ReleaseRecord::new(id, format!("G{id}"), "ps4", "us", "std")).collect()
        };
        let load = |state: &mut AppState, releases: Vec<ReleaseRecord>| {
            handle_event(
                state,
                &Event::WorkerResponse(WorkerResponse::CatalogLoaded {
                    releases: releases.into(),
                }),
            )
            .unwrap();
        };

        load(&mut state, catalog(25));
        handle_event(&mut state, &Event::GoToPage(3)).unwrap();
        assert_eq!(state.window.page(), 3);

        load(&mut state, catalog(5));
        assert_eq!(state.window.page(), 1);
    }

    #[test]
    fn selectors_disabled_while_releases_load() {
        let mut state = loaded_state();
        let (_, actions) = handle_event(&mut state, &Event::SelectTitle(1)).unwrap();
        assert_eq!(actions, vec![Action::PostToWorker(WorkerMessage::load_releases(1))]);

        let (render, _) = handle_event(
            &mut state,
            &Event::SelectOption {
                level: SelectionLevel::Platform,
                value: "ps4".into(),
            },
        )
        .unwrap();
        assert!(!render);
        assert!(state.selection.platform().is_none());

        let panel = state.compute_viewmodel().panel.unwrap();
        assert!(panel.selectors.iter().all(|s| s.disabled));
    }

    #[test]
    fn cascade_resets_and_confirm_commits() {
        let mut state = loaded_state();
        commit_a_ps4_us(&mut state);

        let committed = state.committed.as_ref().unwrap();
        assert_eq!(committed.release.region.code(), "us");
        assert_eq!(committed.manual.page_count, 6);
        assert!(!state.view.catalog_panel_open);
        assert_eq!(state.view.mode, ViewMode::Case);
    }

    #[test]
    fn unavailable_option_is_rejected() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SelectTitle(1)).unwrap();
        deliver_releases(&mut state, 1, releases_of_a());
        handle_event(
            &mut state,
            &Event::SelectOption {
                level: SelectionLevel::Platform,
                value: "pc".into(),
            },
        )
        .unwrap();

        let result = handle_event(
            &mut state,
            &Event::SelectOption {
                level: SelectionLevel::Region,
                value: "eur".into(),
            },
        );
        assert!(matches!(result, Err(GameLibraryError::Selection(_))));
    }

    #[test]
    fn row_click_loads_releases_then_commits_row() {
        let mut state = loaded_state();
        // Rows sort by title: A/ps4/us, A/ps4/eur, A/pc/us, B.
        let (_, actions) = handle_event(&mut state, &Event::RowClicked(1)).unwrap();
        assert_eq!(actions, vec![Action::PostToWorker(WorkerMessage::load_releases(1))]);

        let (render, ignored) = handle_event(&mut state, &Event::RowClicked(0)).unwrap();
        assert!(!render);
        assert!(ignored.is_empty());

        let actions = deliver_releases(&mut state, 1, releases_of_a());
        assert!(matches!(actions.as_slice(), [Action::PostToWorker(WorkerMessage::ProbeAssets { .. })]));
        let committed = state.committed.as_ref().unwrap();
        assert_eq!(committed.release.region.code(), "eur");
        assert!(state.pending_row.is_none());
    }

    #[test]
    fn row_click_past_page_is_an_error() {
        let mut state = loaded_state();
        assert!(handle_event(&mut state, &Event::RowClicked(10)).is_err());
    }

    #[test]
    fn panel_close_disabled_before_commit() {
        let mut state = loaded_state();
        let (render, _) = handle_event(&mut state, &Event::ToggleCatalogPanel).unwrap();
        assert!(!render);
        assert!(state.view.catalog_panel_open);

        commit_a_ps4_us(&mut state);
        handle_event(&mut state, &Event::ToggleCatalogPanel).unwrap();
        assert!(state.view.catalog_panel_open);
        handle_event(&mut state, &Event::ToggleCatalogPanel).unwrap();
        assert!(!state.view.catalog_panel_open);
    }

    #[test]
    fn case_toggle_plays_sounds() {
        let mut state = loaded_state();
        let (_, actions) = handle_event(&mut state, &Event::Interact).unwrap();
        assert_eq!(actions, vec![Action::sound(SoundCue::CaseOpen)]);
        let (_, actions) = handle_event(&mut state, &Event::Interact).unwrap();
        assert_eq!(
            actions,
            vec![Action::PlaySound {
                cue: SoundCue::CaseClose,
                volume: 0.3
            }]
        );
    }

    #[test]
    fn manual_paging_is_bounded_and_flips_pages() {
        let mut state = loaded_state();
        commit_a_ps4_us(&mut state);
        handle_event(&mut state, &Event::SelectMode(ViewMode::Manual)).unwrap();

        let (_, actions) = handle_event(&mut state, &Event::PreviousManualPage).unwrap();
        assert!(actions.is_empty());

        for _ in 0..3 {
            let (_, actions) = handle_event(&mut state, &Event::NextManualPage).unwrap();
            assert_eq!(actions, vec![Action::sound(SoundCue::PageFlip)]);
        }
        let (render, actions) = handle_event(&mut state, &Event::NextManualPage).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.view.manual_page, 4);
    }

    #[test]
    fn zoom_only_applies_in_viewer() {
        let mut state = loaded_state();
        commit_a_ps4_us(&mut state);

        let (render, _) = handle_event(&mut state, &Event::ZoomIn).unwrap();
        assert!(!render);

        handle_event(&mut state, &Event::SelectMode(ViewMode::Cover)).unwrap();
        for _ in 0..5 {
            handle_event(&mut state, &Event::ZoomIn).unwrap();
        }
        assert_eq!(state.view.zoom, 3);
        handle_event(&mut state, &Event::ResetZoom).unwrap();
        assert_eq!(state.view.zoom, 1);

        handle_event(&mut state, &Event::Escape).unwrap();
        assert!(!state.view.image_viewer_open);
    }

    #[test]
    fn additional_mode_ignored_without_items() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::SelectTitle(2)).unwrap();
        deliver_releases(&mut state, 2, vec![ReleaseRecord::new(2, "B", "switch", "jp", "le")]);
        for (level, value) in [
            (SelectionLevel::Platform, "switch"),
            (SelectionLevel::Region, "jp"),
            (SelectionLevel::Edition, "le"),
        ] {
            handle_event(&mut state, &Event::SelectOption { level, value: value.into() }).unwrap();
        }
        handle_event(&mut state, &Event::ConfirmSelection).unwrap();

        let (render, _) = handle_event(&mut state, &Event::SelectMode(ViewMode::Additional)).unwrap();
        assert!(!render);
        assert_eq!(state.view.mode, ViewMode::Case);
    }

    #[test]
    fn fetch_error_keeps_last_good_catalog() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::Start).unwrap();

        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                scope: FetchScope::Catalog,
                message: "Unable to fetch table data: offline".into(),
            }),
        )
        .unwrap();

        assert_eq!(state.catalog.len(), 4);
        assert!(!state.loading.catalog);
        let viewmodel = state.compute_viewmodel();
        assert_eq!(viewmodel.error.as_deref(), Some("Unable to fetch table data: offline"));

        handle_event(&mut state, &Event::DismissError).unwrap();
        assert!(state.error.is_none());
    }

    #[test]
    fn release_fetch_error_reenables_selectors() {
        let mut state = loaded_state();
        handle_event(&mut state, &Event::RowClicked(0)).unwrap();
        handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                scope: FetchScope::Releases { game_id: 1 },
                message: "Unable to fetch game releases for game 1: offline".into(),
            }),
        )
        .unwrap();

        assert!(state.loading.releases.is_none());
        assert!(state.pending_row.is_none());
        assert!(state.committed.is_none());
    }

    #[test]
    fn unsupported_page_size_is_rejected() {
        let mut state = loaded_state();
        assert!(handle_event(&mut state, &Event::SetPageSize(15)).is_err());
        let (render, _) = handle_event(&mut state, &Event::SetPageSize(20)).unwrap();
        assert!(render);
        assert_eq!(state.window.page_size(), 20);
    }

    #[test]
    fn stale_assets_are_ignored() {
        let mut state = loaded_state();
        commit_a_ps4_us(&mut state);
        let (render, _) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AssetsProbed {
                game_id: 2,
                platform: "switch".into(),
                region: "jp".into(),
                edition: "le".into(),
                urls: crate::catalog::AssetUrls {
                    cover: Some("file:///cover.jpg".into()),
                    ..Default::default()
                },
            }),
        )
        .unwrap();
        assert!(!render);
        assert!(state.assets.cover.is_none());
    }
}
