//! View mode state machine for the virtual game case.
//!
//! The viewer shows one physical "face" of the case at a time. Transitions are
//! only ever triggered by explicit user input; no mode is terminal and every
//! mode is reachable from every other through the mode selector, except
//! [`ViewMode::Additional`], which requires the committed release to ship
//! supplementary material.
//!
//! # Example
//!
//! ```rust
//! use game_library::app::modes::ViewMode;
//!
//! assert_eq!(ViewMode::from_key('4'), Some(ViewMode::Manual));
//! assert!(ViewMode::Manual.opens_image_viewer());
//! assert!(!ViewMode::Disc.opens_image_viewer());
//! ```

use crate::app::actions::SoundCue;
use std::fmt;

/// Highest image viewer zoom level.
pub const MAX_ZOOM: u8 = 3;

/// Face of the case currently displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    /// Closed or open case. Initial mode.
    #[default]
    Case,

    /// Cover artwork in the image viewer.
    Cover,

    Disc,

    /// Manual pages, flipped by spread.
    Manual,

    /// Supplementary material shipped with the release.
    ///
    /// Only reachable when the committed release has included items.
    Additional,
}

impl ViewMode {
    /// Every mode, in selector order.
    pub const ALL: [Self; 5] = [Self::Case, Self::Cover, Self::Disc, Self::Manual, Self::Additional];

    /// Maps the mode selector shortcut keys `1`..=`5`.
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::Case),
            '2' => Some(Self::Cover),
            '3' => Some(Self::Disc),
            '4' => Some(Self::Manual),
            '5' => Some(Self::Additional),
            _ => None,
        }
    }

    /// Shortcut key shown next to the mode in the selector.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Case => '1',
            Self::Cover => '2',
            Self::Disc => '3',
            Self::Manual => '4',
            Self::Additional => '5',
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Case => "CASE",
            Self::Cover => "COVER",
            Self::Disc => "DISC",
            Self::Manual => "MANUAL",
            Self::Additional => "ADDITIONAL",
        }
    }

    /// Parses a mode name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(name.trim()))
    }

    /// Whether entering this mode opens the image viewer.
    #[must_use]
    pub const fn opens_image_viewer(self) -> bool {
        matches!(self, Self::Cover | Self::Manual)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation flags read by the rendering layer.
///
/// Mutated only through the methods below, each of which reports whether
/// anything changed so the caller can skip a redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,

    /// Set while the full-screen image viewer is shown (Cover and Manual).
    pub image_viewer_open: bool,

    /// Case lid state. Independent of the mode.
    pub case_open: bool,

    /// Hint box shown in Case mode.
    pub info_box_visible: bool,

    /// Title selection panel.
    pub catalog_panel_open: bool,

    /// Current manual spread, 1-based.
    pub manual_page: u32,

    /// Image viewer zoom, `1..=MAX_ZOOM`.
    pub zoom: u8,

    /// Cover viewer shows the back cover.
    pub cover_flipped: bool,

    /// Cover viewer shows the cover text instead of the artwork.
    pub cover_text_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Case,
            image_viewer_open: false,
            case_open: false,
            info_box_visible: true,
            catalog_panel_open: true,
            manual_page: 1,
            zoom: 1,
            cover_flipped: false,
            cover_text_visible: false,
        }
    }
}

impl ViewState {
    /// Switches to `mode`, opening or closing the image viewer to match.
    ///
    /// `Additional` is refused unless `additional_available`. Returns whether
    /// the request was applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_library::app::modes::{ViewMode, ViewState};
    ///
    /// let mut view = ViewState::default();
    /// assert!(view.enter_mode(ViewMode::Cover, false));
    /// assert!(view.image_viewer_open);
    /// assert!(!view.enter_mode(ViewMode::Additional, false));
    /// assert_eq!(view.mode, ViewMode::Cover);
    /// ```
    pub fn enter_mode(&mut self, mode: ViewMode, additional_available: bool) -> bool {
        if mode == ViewMode::Additional && !additional_available {
            tracing::debug!("additional mode unavailable for this release");
            return false;
        }

        let previous = self.mode;
        self.mode = mode;
        self.image_viewer_open = mode.opens_image_viewer();
        self.zoom = 1;
        self.cover_flipped = false;
        self.cover_text_visible = false;

        tracing::debug!(from = %previous, to = %mode, viewer = self.image_viewer_open, "view mode changed");
        true
    }

    /// Opens or closes the case and returns the sound to play.
    pub fn toggle_case(&mut self) -> SoundCue {
        self.case_open = !self.case_open;
        if self.case_open {
            SoundCue::CaseOpen
        } else {
            SoundCue::CaseClose
        }
    }

    /// Shows or hides the image viewer without changing mode.
    pub fn toggle_image_viewer(&mut self) {
        self.image_viewer_open = !self.image_viewer_open;
        self.zoom = 1;
    }

    /// Advances one manual spread. A manual of `page_count` pages has
    /// `page_count / 2 + 1` spreads.
    pub fn next_manual_page(&mut self, page_count: u32) -> bool {
        if self.manual_page < page_count / 2 + 1 {
            self.manual_page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_manual_page(&mut self) -> bool {
        if self.manual_page > 1 {
            self.manual_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn zoom_in(&mut self) -> bool {
        if self.zoom < MAX_ZOOM {
            self.zoom += 1;
            true
        } else {
            false
        }
    }

    pub fn zoom_out(&mut self) -> bool {
        if self.zoom > 1 {
            self.zoom -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset_zoom(&mut self) -> bool {
        let changed = self.zoom != 1;
        self.zoom = 1;
        changed
    }

    /// Returns to the closed case after a new release is committed.
    pub fn reset_for_commit(&mut self) {
        *self = Self {
            info_box_visible: self.info_box_visible,
            catalog_panel_open: false,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_and_manual_open_viewer_others_close_it() {
        let mut view = ViewState::default();
        view.enter_mode(ViewMode::Manual, false);
        assert!(view.image_viewer_open);
        view.enter_mode(ViewMode::Disc, false);
        assert!(!view.image_viewer_open);
        view.enter_mode(ViewMode::Cover, false);
        assert!(view.image_viewer_open);
        view.enter_mode(ViewMode::Case, false);
        assert!(!view.image_viewer_open);
    }

    #[test]
    fn additional_requires_included_items() {
        let mut view = ViewState::default();
        assert!(!view.enter_mode(ViewMode::Additional, false));
        assert_eq!(view.mode, ViewMode::Case);
        assert!(view.enter_mode(ViewMode::Additional, true));
        assert_eq!(view.mode, ViewMode::Additional);
    }

    #[test]
    fn case_toggle_alternates_sounds() {
        let mut view = ViewState::default();
        assert_eq!(view.toggle_case(), SoundCue::CaseOpen);
        assert!(view.case_open);
        assert_eq!(view.toggle_case(), SoundCue::CaseClose);
        assert!(!view.case_open);
    }

    #[test]
    fn manual_pages_are_bounded() {
        let mut view = ViewState::default();
        assert!(!view.previous_manual_page());
        assert!(view.next_manual_page(4));
        assert!(view.next_manual_page(4));
        assert!(!view.next_manual_page(4));
        assert_eq!(view.manual_page, 3);

        let mut empty = ViewState::default();
        assert!(!empty.next_manual_page(0));
    }

    #[test]
    fn zoom_is_bounded() {
        let mut view = ViewState::default();
        assert!(!view.zoom_out());
        assert!(view.zoom_in());
        assert!(view.zoom_in());
        assert!(!view.zoom_in());
        assert_eq!(view.zoom, MAX_ZOOM);
        assert!(view.reset_zoom());
        assert_eq!(view.zoom, 1);
    }

    #[test]
    fn commit_reset_closes_panel_and_keeps_info_preference() {
        let mut view = ViewState::default();
        view.info_box_visible = false;
        view.enter_mode(ViewMode::Manual, false);
        view.next_manual_page(10);
        view.toggle_case();

        view.reset_for_commit();
        assert_eq!(view.mode, ViewMode::Case);
        assert!(!view.catalog_panel_open);
        assert!(!view.case_open);
        assert_eq!(view.manual_page, 1);
        assert!(!view.info_box_visible);
    }

    #[test]
    fn keys_round_trip_through_selector() {
        for mode in ViewMode::ALL {
            assert_eq!(ViewMode::from_key(mode.key()), Some(mode));
        }
        assert_eq!(ViewMode::from_key('6'), None);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(ViewMode::from_name("manual"), Some(ViewMode::Manual));
        assert_eq!(ViewMode::from_name(" Additional "), Some(ViewMode::Additional));
        assert_eq!(ViewMode::from_name("box"), None);
    }

    #[test]
    fn initial_mode_is_case() {
        assert_eq!(ViewMode::default(), ViewMode::Case);
    }
}
