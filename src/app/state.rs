//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! catalog viewer, along with methods for table windowing, release commits and
//! view model generation. It is the single source of truth for everything the
//! presentation layer shows.
//!
//! # Architecture
//!
//! `AppState` separates loaded data (catalog, games, the selected title's
//! releases) from user-controlled state (filters, sort, page window,
//! selection, view flags). Derived data such as the visible table page is
//! never stored; it is recomputed from a snapshot whenever a view model is
//! requested.
//!
//! # State Components
//!
//! - **Catalog**: Every release joined with its title, fetched once
//! - **Table**: Filter criteria, sort spec and page window
//! - **Selection**: Cascading title / platform / region / edition choice
//! - **Committed**: The release currently shown in the case, with its images
//! - **View**: Mode, case, viewer, panel and manual paging flags
//! - **Loading**: Outstanding catalog and release fetches
//!
//! # Example
//!
//! ```rust
//! use game_library::app::AppState;
//! use game_library::ui::Theme;
//!
//! let state = AppState::new(Theme::default(), 10);
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.panel.is_some());
//! ```

use super::actions::Action;
use super::modes::{ViewMode, ViewState};
use crate::catalog::AssetUrls;
use crate::domain::error::{GameLibraryError, Result};
use crate::domain::{Game, GameId, IncludedItem, ReleaseRecord};
use crate::selection::{self, CommittedRelease, SelectOption, SelectionLevel, SelectionState, TitleChoice};
use crate::table::{
    compute_visible_rows, filter_and_sort, FilterCriteria, PageWindow, PaginationSummary, SortKey, SortSpec,
    TablePage, TextColumn,
};
use crate::ui::helpers;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    CatalogPanel, ColumnHeader, DisplayRow, EmptyState, FooterInfo, GenreBadge, HeaderInfo, ImageSlot,
    ImageViewerInfo, ModeOption, SelectorInfo, UIViewModel, ViewerInfo,
};
use crate::worker::WorkerMessage;
use std::sync::Arc;

/// Outstanding fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    /// The catalog table is loading.
    pub catalog: bool,

    /// Releases of this game are loading. Selectors are disabled and row
    /// clicks ignored meanwhile.
    pub releases: Option<GameId>,
}

/// Central application state container.
///
/// Mutated only by the event handler on the driver thread. View models are
/// computed on demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Every release, joined with its title. Last good copy is kept when a
    /// reload fails.
    pub catalog: Arc<[ReleaseRecord]>,

    /// Titles offered by the title selector, ordered by title.
    pub games: Arc<[Game]>,

    pub filters: FilterCriteria,
    pub sort: SortSpec,
    pub window: PageWindow,

    pub selection: SelectionState,

    /// Releases of the selected title, backing the dependent selectors.
    pub releases: Arc<[ReleaseRecord]>,

    /// Release shown in the case.
    pub committed: Option<CommittedRelease>,

    /// Image URLs of the committed release. Empty until the probe answers.
    pub assets: AssetUrls,

    pub view: ViewState,

    pub loading: LoadingState,

    /// Row clicked while its title's releases were loading, used to prefill
    /// the selectors once they arrive.
    pub pending_row: Option<ReleaseRecord>,

    /// Last fetch failure, shown until dismissed or superseded.
    pub error: Option<String>,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates an empty state. Data arrives later through worker responses.
    #[must_use]
    pub fn new(theme: Theme, page_size: usize) -> Self {
        Self {
            catalog: Arc::from(Vec::new()),
            games: Arc::from(Vec::new()),
            filters: FilterCriteria::default(),
            sort: SortSpec::default(),
            window: PageWindow::new(page_size),
            selection: SelectionState::new(),
            releases: Arc::from(Vec::new()),
            committed: None,
            assets: AssetUrls::default(),
            view: ViewState::default(),
            loading: LoadingState::default(),
            pending_row: None,
            error: None,
            theme,
        }
    }

    /// Rows visible with the current filters, sort and page.
    #[must_use]
    pub fn visible_rows(&self) -> TablePage<'_> {
        compute_visible_rows(&self.catalog, &self.filters, &self.sort, &self.window)
    }

    #[must_use]
    pub fn filtered_count(&self) -> usize {
        filter_and_sort(&self.catalog, &self.filters, &self.sort).len()
    }

    #[must_use]
    pub fn pagination(&self) -> PaginationSummary {
        PaginationSummary::new(&self.window, self.filtered_count())
    }

    /// Applies `update` to the filters, returning to page 1 if they changed.
    pub fn update_filters<F>(&mut self, update: F) -> bool
    where
        F: FnOnce(&mut FilterCriteria),
    {
        let before = self.filters.clone();
        update(&mut self.filters);
        let changed = self.filters != before;
        if changed {
            self.window.reset();
            tracing::debug!(filters = ?self.filters, "filters changed");
        }
        changed
    }

    /// Sorts by `key`, flipping direction if it is already the sort column.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort.toggle(key);
        self.window.reset();
        tracing::debug!(key = ?self.sort.key, direction = ?self.sort.direction, "sort changed");
    }

    /// Moves to `page`; out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        let total_pages = self.window.total_pages(self.filtered_count());
        self.window.go_to(page, total_pages)
    }

    /// Resolves a title for the title selector.
    ///
    /// # Errors
    ///
    /// Returns [`GameLibraryError::Selection`] if no game has this id.
    pub fn title_choice(&self, game_id: GameId) -> Result<TitleChoice> {
        self.games
            .iter()
            .find(|game| game.id == game_id)
            .map(|game| game.title.clone())
            .or_else(|| {
                self.catalog
                    .iter()
                    .find(|release| release.game_id == game_id)
                    .map(|release| release.title.clone())
            })
            .map(|title| TitleChoice { game_id, title })
            .ok_or_else(|| GameLibraryError::Selection(format!("unknown game id {game_id}")))
    }

    /// Whether `releases` currently holds the releases of `game_id`.
    #[must_use]
    pub fn has_releases_for(&self, game_id: GameId) -> bool {
        self.releases.first().is_some_and(|release| release.game_id == game_id)
    }

    /// Whether the Additional mode can be entered.
    #[must_use]
    pub fn additional_available(&self) -> bool {
        self.committed.as_ref().is_some_and(CommittedRelease::has_additional)
    }

    /// Closing the panel is only allowed once something is in the case.
    #[must_use]
    pub const fn can_close_panel(&self) -> bool {
        self.committed.is_some()
    }

    /// Page count of the committed release's manual, 0 without one.
    #[must_use]
    pub fn manual_page_count(&self) -> u32 {
        self.committed.as_ref().map_or(0, |committed| committed.manual.page_count)
    }

    /// Publishes a release to the case.
    ///
    /// Closes the panel, returns to the closed case and asks the worker for
    /// the release's images.
    pub fn commit(&mut self, committed: CommittedRelease) -> Action {
        tracing::info!(
            game_id = committed.release.game_id,
            platform = %committed.release.platform.code(),
            region = %committed.release.region.code(),
            edition = %committed.release.edition.code(),
            manual_pages = committed.manual.page_count,
            "release committed"
        );

        let message =
            WorkerMessage::probe_assets(Box::new(committed.release.clone()), committed.manual.page_count);
        self.committed = Some(committed);
        self.assets = AssetUrls::default();
        self.pending_row = None;
        self.view.reset_for_commit();
        Action::PostToWorker(message)
    }

    /// Transforms the state into a renderable view model.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let _span = tracing::trace_span!("compute_viewmodel").entered();

        UIViewModel {
            header: HeaderInfo {
                title: "Game Library".to_string(),
                release: self
                    .committed
                    .as_ref()
                    .map(|committed| helpers::release_label(&committed.release)),
            },
            panel: self.view.catalog_panel_open.then(|| self.catalog_panel()),
            viewer: self.viewer_info(),
            mode_selector: self.mode_selector(),
            footer: FooterInfo {
                keybindings: self.footer_hints().join(" | "),
            },
            error: self.error.clone(),
        }
    }

    fn catalog_panel(&self) -> CatalogPanel {
        let page = self.visible_rows();
        let releases_loading = self.loading.releases.is_some();

        let mut filters: Vec<(String, String)> = TextColumn::ALL
            .into_iter()
            .filter(|column| !self.filters.text(*column).is_empty())
            .map(|column| (column.label().to_string(), self.filters.text(column).to_string()))
            .collect();
        if !self.filters.genre.is_empty() {
            filters.push(("Genre".to_string(), self.filters.genre.clone()));
        }
        if !self.filters.dates.is_open() {
            let bound = |date: Option<chrono::NaiveDate>| date.map_or_else(|| "…".to_string(), |d| d.to_string());
            filters.push((
                "Release Date".to_string(),
                format!("{} to {}", bound(self.filters.dates.start), bound(self.filters.dates.end)),
            ));
        }

        let columns = SortKey::ALL
            .into_iter()
            .map(|key| ColumnHeader {
                key,
                label: key.label(),
                indicator: (self.sort.key == key).then(|| self.sort.direction.indicator()),
            })
            .collect();

        let rows = page
            .rows
            .iter()
            .enumerate()
            .map(|(index, release)| DisplayRow {
                index,
                title: release.title.clone(),
                platform: release.platform.label().to_string(),
                region: release.region.label().to_string(),
                edition: release.edition.label().to_string(),
                release_date: helpers::format_date(release.release_date),
                genres: release
                    .genres
                    .iter()
                    .map(|genre| GenreBadge {
                        name: genre.clone(),
                        color: self.theme.genres.color_for(genre).to_string(),
                    })
                    .collect(),
            })
            .collect();

        let empty_state = (!self.loading.catalog && page.is_empty()).then(|| EmptyState {
            message: "No results found".to_string(),
            subtitle: if self.filters.is_empty() {
                "The catalog has no releases".to_string()
            } else {
                "Try clearing some filters".to_string()
            },
        });

        let title_selector = SelectorInfo {
            label: "Title",
            options: self
                .games
                .iter()
                .map(|game| SelectOption {
                    value: game.id.to_string(),
                    label: game.title.clone(),
                })
                .collect(),
            selected: self.selection.title().map(|title| title.game_id.to_string()),
            disabled: releases_loading || self.games.is_empty(),
        };

        let selectors = SelectionLevel::ALL
            .into_iter()
            .map(|level| {
                let options = selection::options_for(level, &self.releases, &self.selection);
                SelectorInfo {
                    label: level.label(),
                    disabled: releases_loading || options.is_empty(),
                    options,
                    selected: self.selection.value(level).map(str::to_string),
                }
            })
            .collect();

        CatalogPanel {
            filters,
            columns,
            rows,
            empty_state,
            pagination: PaginationSummary::new(&self.window, page.filtered_count),
            loading: self.loading.catalog,
            title_selector,
            selectors,
            can_confirm: !releases_loading
                && selection::confirm_selection(&self.releases, &self.selection).is_some(),
            can_close: self.can_close_panel(),
        }
    }

    fn viewer_info(&self) -> ViewerInfo {
        let view = &self.view;
        let mut lines = Vec::new();
        let mut images = Vec::new();
        let mut caption = String::new();

        match view.mode {
            ViewMode::Case => {
                lines.push(if view.case_open { "The case is open." } else { "The case is closed." }.to_string());
                if self.committed.is_none() {
                    lines.push("No release selected. Press Tab to choose a title.".to_string());
                }
                if view.info_box_visible {
                    let verb = if view.case_open { "close" } else { "open" };
                    lines.push(format!("Press E to {verb} the case."));
                    lines.push("Press 1-5 to switch view mode.".to_string());
                    lines.push("Press Q to hide this information.".to_string());
                }
            }
            ViewMode::Cover => {
                caption = if view.cover_flipped { "Back cover" } else { "Front cover" }.to_string();
                images.push(ImageSlot {
                    label: "Cover".to_string(),
                    url: self.assets.cover.clone(),
                });
                if view.cover_text_visible {
                    let text = self
                        .committed
                        .as_ref()
                        .and_then(|committed| committed.release.cover_text.clone())
                        .unwrap_or_else(|| "No cover text available.".to_string());
                    lines.push(text);
                }
            }
            ViewMode::Disc => {
                images.push(ImageSlot {
                    label: "Disc".to_string(),
                    url: self.assets.disc.clone(),
                });
                images.push(ImageSlot {
                    label: "Disc back".to_string(),
                    url: self.assets.disc_back.clone(),
                });
            }
            ViewMode::Manual => {
                let page_count = self.manual_page_count();
                if page_count == 0 {
                    lines.push("This release has no manual.".to_string());
                } else {
                    let spreads = page_count / 2 + 1;
                    caption = format!("Spread {} of {spreads}", view.manual_page);
                    lines.push(caption.clone());
                    let (left, right) = helpers::spread_pages(view.manual_page, page_count);
                    images.extend([left, right].into_iter().flatten().map(|page| ImageSlot {
                        label: format!("Page {page}"),
                        url: helpers::manual_page_url(&self.assets, page),
                    }));
                }
            }
            ViewMode::Additional => {
                let items = self
                    .committed
                    .as_ref()
                    .map_or(&[][..], |committed| committed.included_items.as_slice());
                lines.extend(items.iter().map(|item| match item {
                    IncludedItem::Manual { page_count, .. } => format!("Manual ({page_count} pages)"),
                    IncludedItem::Other { kind } => kind.clone(),
                }));
            }
        }

        ViewerInfo {
            mode: view.mode,
            lines,
            images,
            image_viewer: view.image_viewer_open.then(|| ImageViewerInfo {
                caption,
                zoom: view.zoom,
            }),
        }
    }

    fn mode_selector(&self) -> Vec<ModeOption> {
        let additional = self.additional_available();
        ViewMode::ALL
            .into_iter()
            .filter(|mode| *mode != ViewMode::Additional || additional)
            .map(|mode| ModeOption {
                mode,
                key: mode.key(),
                label: mode.label(),
                active: mode == self.view.mode,
            })
            .collect()
    }

    fn footer_hints(&self) -> Vec<&'static str> {
        let view = &self.view;
        let mut hints = Vec::new();

        if view.catalog_panel_open {
            hints.push("row <n>: pick release");
            hints.push("confirm: show release");
            if self.can_close_panel() {
                hints.push("Tab: close panel");
            }
            return hints;
        }

        match (view.mode, view.image_viewer_open) {
            (ViewMode::Case, _) => {
                hints.push(if view.case_open { "E: close case" } else { "E: open case" });
                hints.push("Q: show/hide information");
            }
            (ViewMode::Cover, true) => {
                hints.extend(["E: flip cover", "Q: cover text", "Up/Down: zoom", "R: reset zoom", "Esc: close viewer"]);
            }
            (ViewMode::Manual, true) => {
                hints.extend(["A: previous page", "D: next page", "Up/Down: zoom", "R: reset zoom", "Q: close viewer"]);
            }
            (ViewMode::Cover | ViewMode::Manual, false) => hints.push("Q: open viewer"),
            (ViewMode::Disc | ViewMode::Additional, _) => {}
        }
        hints.push("1-5: mode");
        hints.push("Tab: change title");
        hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(count: i64) -> Arc<[ReleaseRecord]> {
        (1..=count)
            .map(|id| ReleaseRecord::new(id, format!("Game {id:02}"), "ps4", "us", "std"))
            .collect::<Vec<_>>()
            .into()
    }

    fn committed_with_items(items: Vec<IncludedItem>) -> CommittedRelease {
        let mut release = ReleaseRecord::new(1, "Fallout 4", "ps4", "us", "std");
        release.included_items = items;
        CommittedRelease::new(release)
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let mut state = AppState::new(Theme::default(), 10);
        state.catalog = catalog(25);
        assert!(state.go_to_page(3));

        assert!(state.update_filters(|filters| filters.title = "game".into()));
        assert_eq!(state.window.page(), 1);
        assert!(!state.update_filters(|filters| filters.title = "game".into()));
    }

    #[test]
    fn out_of_range_page_is_ignored() {
        let mut state = AppState::new(Theme::default(), 10);
        state.catalog = catalog(25);
        assert!(!state.go_to_page(4));
        assert!(!state.go_to_page(0));
        assert_eq!(state.window.page(), 1);
    }

    #[test]
    fn third_page_of_twenty_five_has_five_rows() {
        let mut state = AppState::new(Theme::default(), 10);
        state.catalog = catalog(25);
        state.go_to_page(3);

        let panel = state.compute_viewmodel().panel.unwrap();
        assert_eq!(panel.rows.len(), 5);
        assert_eq!(panel.pagination.entries_text(), "Showing 21 to 25 of 25 entries");
    }

    #[test]
    fn empty_table_shows_no_results() {
        let mut state = AppState::new(Theme::default(), 10);
        state.catalog = catalog(3);
        state.update_filters(|filters| filters.title = "zelda".into());

        let panel = state.compute_viewmodel().panel.unwrap();
        assert!(panel.rows.is_empty());
        assert_eq!(panel.empty_state.unwrap().message, "No results found");
    }

    #[test]
    fn sorted_column_carries_indicator() {
        let mut state = AppState::new(Theme::default(), 10);
        state.sort_by(SortKey::Platform);
        state.sort_by(SortKey::Platform);

        let panel = state.compute_viewmodel().panel.unwrap();
        let platform = panel.columns.iter().find(|c| c.key == SortKey::Platform).unwrap();
        assert_eq!(platform.indicator, Some("▼"));
        assert!(panel.columns.iter().filter(|c| c.indicator.is_some()).count() == 1);
    }

    #[test]
    fn genre_badges_use_palette() {
        let mut state = AppState::new(Theme::default(), 10);
        let mut release = ReleaseRecord::new(1, "Doom", "pc", "us", "std");
        release.genres = vec!["FPS".into(), "Horror".into()];
        state.catalog = vec![release].into();

        let panel = state.compute_viewmodel().panel.unwrap();
        let colors: Vec<&str> = panel.rows[0].genres.iter().map(|b| b.color.as_str()).collect();
        assert_eq!(colors, vec!["#ff4500", "#777777"]);
    }

    #[test]
    fn additional_mode_hidden_without_included_items() {
        let mut state = AppState::new(Theme::default(), 10);
        state.commit(committed_with_items(Vec::new()));
        let modes: Vec<ViewMode> = state.compute_viewmodel().mode_selector.iter().map(|m| m.mode).collect();
        assert!(!modes.contains(&ViewMode::Additional));

        state.commit(committed_with_items(vec![IncludedItem::Other { kind: "poster".into() }]));
        let modes: Vec<ViewMode> = state.compute_viewmodel().mode_selector.iter().map(|m| m.mode).collect();
        assert!(modes.contains(&ViewMode::Additional));
    }

    #[test]
    fn commit_closes_panel_and_probes_assets() {
        let mut state = AppState::new(Theme::default(), 10);
        assert!(!state.can_close_panel());

        let action = state.commit(committed_with_items(vec![IncludedItem::Manual {
            page_width: None,
            page_height: None,
            page_count: 8,
        }]));

        assert!(state.can_close_panel());
        assert!(!state.view.catalog_panel_open);
        assert_eq!(state.manual_page_count(), 8);
        assert!(matches!(
            action,
            Action::PostToWorker(WorkerMessage::ProbeAssets { manual_pages: 8, .. })
        ));
    }

    #[test]
    fn manual_viewer_shows_current_spread() {
        let mut state = AppState::new(Theme::default(), 10);
        state.commit(committed_with_items(vec![IncludedItem::Manual {
            page_width: None,
            page_height: None,
            page_count: 4,
        }]));
        state.view.enter_mode(ViewMode::Manual, false);
        state.view.next_manual_page(4);

        let viewer = state.compute_viewmodel().viewer;
        let labels: Vec<&str> = viewer.images.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Page 2", "Page 3"]);
        assert!(viewer.images.iter().all(|i| i.url.is_none()));
        assert_eq!(viewer.image_viewer.unwrap().caption, "Spread 2 of 3");
    }

    #[test]
    fn title_choice_falls_back_to_catalog() {
        let mut state = AppState::new(Theme::default(), 10);
        state.catalog = catalog(2);
        assert_eq!(state.title_choice(2).unwrap().title, "Game 02");
        assert!(state.title_choice(9).is_err());
    }
}
