//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They contain
//! no business logic, only display-ready data: labels are resolved, colors
//! picked, and disabled controls already marked.
//!
//! # Example
//!
//! ```rust
//! use game_library::ui::viewmodel::{FooterInfo, HeaderInfo};
//!
//! let header = HeaderInfo { title: "Game Library".to_string(), release: None };
//! let footer = FooterInfo { keybindings: "Tab: change title".to_string() };
//! assert!(header.release.is_none());
//! assert!(!footer.keybindings.is_empty());
//! ```

use crate::app::modes::ViewMode;
use crate::selection::SelectOption;
use crate::table::{PaginationSummary, SortKey};

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Title selection panel, present while it is open.
    pub panel: Option<CatalogPanel>,

    /// What the case area currently shows.
    pub viewer: ViewerInfo,

    /// Mode buttons, `Additional` omitted when unavailable.
    pub mode_selector: Vec<ModeOption>,

    pub footer: FooterInfo,

    /// Last fetch failure shown to the user.
    pub error: Option<String>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Committed release, e.g. "Fallout 4 - PlayStation 4 / United States / Standard".
    pub release: Option<String>,
}

/// Footer display information.
///
/// Contains help text and keybinding hints for the bottom of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// The catalog table together with the selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPanel {
    /// Active filters, as `(column, value)` pairs.
    pub filters: Vec<(String, String)>,

    pub columns: Vec<ColumnHeader>,

    pub rows: Vec<DisplayRow>,

    /// Set when no row matches (or the catalog is empty).
    pub empty_state: Option<EmptyState>,

    pub pagination: PaginationSummary,

    /// The catalog fetch is still outstanding.
    pub loading: bool,

    pub title_selector: SelectorInfo,

    /// Platform, region and edition, in cascade order.
    pub selectors: Vec<SelectorInfo>,

    /// The Confirm button is enabled.
    pub can_confirm: bool,

    /// The Close button is enabled.
    pub can_close: bool,
}

/// Table column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub key: SortKey,
    pub label: &'static str,

    /// Sort arrow, on the sorted column only.
    pub indicator: Option<&'static str>,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Position within the visible page, as accepted by row clicks.
    pub index: usize,
    pub title: String,
    pub platform: String,
    pub region: String,
    pub edition: String,
    pub release_date: String,
    pub genres: Vec<GenreBadge>,
}

/// Colored genre label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreBadge {
    pub name: String,
    /// Hex color from the theme's genre palette.
    pub color: String,
}

/// A dropdown and its current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorInfo {
    pub label: &'static str,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,

    /// Releases are loading or the parent level is unset.
    pub disabled: bool,
}

/// Mode selector button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeOption {
    pub mode: ViewMode,
    pub key: char,
    pub label: &'static str,
    pub active: bool,
}

/// Case area contents.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerInfo {
    pub mode: ViewMode,

    /// Descriptive lines for the current mode (case state, info box, items).
    pub lines: Vec<String>,

    /// Images shown for the current mode.
    pub images: Vec<ImageSlot>,

    /// Full-screen image viewer, when open.
    pub image_viewer: Option<ImageViewerInfo>,
}

/// Image viewer overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageViewerInfo {
    pub caption: String,
    /// Zoom level, 1 to 3.
    pub zoom: u8,
}

/// One image, resolved or placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlot {
    pub label: String,

    /// `None` renders a placeholder.
    pub url: Option<String>,
}
