//! Cascading selection resolver: title -> platform -> region -> edition.
//!
//! Each level's options are derived from the releases matching every level
//! above it, so an offered value always has at least one backing record.
//! Changing a level clears every level below it.
//!
//! A selection is only published to the view once all four levels hold a
//! value still present in their current option set
//! ([`confirm_selection`]).

use crate::domain::error::{GameLibraryError, Result};
use crate::domain::{Edition, GameId, IncludedItem, ManualInfo, Platform, Region, ReleaseRecord};
use std::fmt;

/// Dependent selector level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionLevel {
    Platform,
    Region,
    Edition,
}

impl SelectionLevel {
    pub const ALL: [Self; 3] = [Self::Platform, Self::Region, Self::Edition];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::Region => "Region",
            Self::Edition => "Edition",
        }
    }
}

impl fmt::Display for SelectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of a selector: stored code and display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// The chosen title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleChoice {
    pub game_id: GameId,
    pub title: String,
}

/// In-progress choice of a release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    title: Option<TitleChoice>,
    platform: Option<Platform>,
    region: Option<Region>,
    edition: Option<Edition>,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn title(&self) -> Option<&TitleChoice> {
        self.title.as_ref()
    }

    #[must_use]
    pub const fn platform(&self) -> Option<&Platform> {
        self.platform.as_ref()
    }

    #[must_use]
    pub const fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    #[must_use]
    pub const fn edition(&self) -> Option<&Edition> {
        self.edition.as_ref()
    }

    /// Code currently held at `level`, if any.
    #[must_use]
    pub fn value(&self, level: SelectionLevel) -> Option<&str> {
        match level {
            SelectionLevel::Platform => self.platform.as_ref().map(Platform::code),
            SelectionLevel::Region => self.region.as_ref().map(Region::code),
            SelectionLevel::Edition => self.edition.as_ref().map(Edition::code),
        }
    }

    /// Whether all four levels hold a value.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.title.is_some() && self.platform.is_some() && self.region.is_some() && self.edition.is_some()
    }

    /// Chooses a title and clears platform, region and edition.
    pub fn set_title(&mut self, choice: TitleChoice) {
        tracing::debug!(game_id = choice.game_id, title = %choice.title, "title selected");
        self.title = Some(choice);
        self.platform = None;
        self.region = None;
        self.edition = None;
    }

    /// Clears the whole selection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sets `level` to `code`, clearing every level below it.
    ///
    /// An empty `code` clears the level.
    ///
    /// # Errors
    ///
    /// Returns [`GameLibraryError::Selection`] if `code` is not among the
    /// current options for `level`.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_library::domain::ReleaseRecord;
    /// use game_library::selection::{SelectionLevel, SelectionState, TitleChoice};
    ///
    /// let releases = vec![ReleaseRecord::new(1, "A", "ps4", "us", "std")];
    /// let mut selection = SelectionState::new();
    /// selection.set_title(TitleChoice { game_id: 1, title: "A".into() });
    ///
    /// assert!(selection.set(SelectionLevel::Platform, "ps4", &releases).is_ok());
    /// assert!(selection.set(SelectionLevel::Region, "jp", &releases).is_err());
    /// ```
    pub fn set(&mut self, level: SelectionLevel, code: &str, releases: &[ReleaseRecord]) -> Result<()> {
        let code = code.trim();
        if !code.is_empty() {
            let wanted = code.to_lowercase();
            let offered = options_for(level, releases, self);
            if !offered.iter().any(|option| option.value == wanted) {
                return Err(GameLibraryError::Selection(format!(
                    "{level} '{code}' is not available for the current selection"
                )));
            }
        }

        let value = (!code.is_empty()).then_some(code);
        match level {
            SelectionLevel::Platform => {
                self.platform = value.map(Platform::from_code);
                self.region = None;
                self.edition = None;
            }
            SelectionLevel::Region => {
                self.region = value.map(Region::from_code);
                self.edition = None;
            }
            SelectionLevel::Edition => {
                self.edition = value.map(Edition::from_code);
            }
        }

        tracing::debug!(level = %level, code = %code, "selection level set");
        Ok(())
    }

    /// Selects a table row's title and, when the row's platform, region and
    /// edition are valid for `releases`, pre-fills them too.
    ///
    /// Returns `true` when all four levels were filled.
    pub fn prefill_from_row(&mut self, row: &ReleaseRecord, releases: &[ReleaseRecord]) -> bool {
        self.set_title(TitleChoice {
            game_id: row.game_id,
            title: row.title.clone(),
        });

        let filled = self.set(SelectionLevel::Platform, row.platform.code(), releases).is_ok()
            && self.set(SelectionLevel::Region, row.region.code(), releases).is_ok()
            && self.set(SelectionLevel::Edition, row.edition.code(), releases).is_ok();

        if !filled {
            tracing::debug!(game_id = row.game_id, "row values not offered, partial prefill");
        }
        filled
    }

    fn matches_through(&self, level: SelectionLevel, record: &ReleaseRecord) -> bool {
        let Some(title) = &self.title else {
            return false;
        };
        if record.game_id != title.game_id {
            return false;
        }
        match level {
            SelectionLevel::Platform => true,
            SelectionLevel::Region => self.platform.as_ref() == Some(&record.platform),
            SelectionLevel::Edition => {
                self.platform.as_ref() == Some(&record.platform) && self.region.as_ref() == Some(&record.region)
            }
        }
    }
}

/// Distinct options for `level` among releases matching the levels above it.
///
/// Options appear in first-seen order. Without a title, or without the
/// parent level, the list is empty.
///
/// # Examples
///
/// ```
/// use game_library::domain::ReleaseRecord;
/// use game_library::selection::{options_for, SelectionLevel, SelectionState, TitleChoice};
///
/// let releases = vec![
///     ReleaseRecord::new(1, "A", "ps4", "us", "std"),
///     ReleaseRecord::new(1, "A", "pc", "us", "std"),
/// ];
/// let mut selection = SelectionState::new();
/// selection.set_title(TitleChoice { game_id: 1, title: "A".into() });
///
/// let labels: Vec<String> = options_for(SelectionLevel::Platform, &releases, &selection)
///     .into_iter()
///     .map(|o| o.label)
///     .collect();
/// assert_eq!(labels, vec!["PlayStation 4", "PC"]);
/// ```
#[must_use]
pub fn options_for(level: SelectionLevel, releases: &[ReleaseRecord], selection: &SelectionState) -> Vec<SelectOption> {
    let mut options: Vec<SelectOption> = Vec::new();

    for record in releases.iter().filter(|r| selection.matches_through(level, r)) {
        let (value, label) = match level {
            SelectionLevel::Platform => (record.platform.code(), record.platform.label()),
            SelectionLevel::Region => (record.region.code(), record.region.label()),
            SelectionLevel::Edition => (record.edition.code(), record.edition.label()),
        };
        if !options.iter().any(|option| option.value == value) {
            options.push(SelectOption {
                value: value.to_string(),
                label: label.to_string(),
            });
        }
    }

    options
}

/// A release confirmed for viewing.
#[derive(Debug, Clone, PartialEq)]
pub struct CommittedRelease {
    pub release: ReleaseRecord,
    pub included_items: Vec<IncludedItem>,
    pub manual: ManualInfo,
}

impl CommittedRelease {
    #[must_use]
    pub fn new(release: ReleaseRecord) -> Self {
        let included_items = release.included_items.clone();
        let manual = ManualInfo::from_items(&included_items);
        Self {
            release,
            included_items,
            manual,
        }
    }

    /// Whether the release ships supplementary material.
    #[must_use]
    pub fn has_additional(&self) -> bool {
        !self.included_items.is_empty()
    }
}

/// Resolves a complete selection to its release.
///
/// Returns `None` unless every level is set and still offered.
#[must_use]
pub fn confirm_selection(releases: &[ReleaseRecord], selection: &SelectionState) -> Option<CommittedRelease> {
    if !selection.is_complete() {
        return None;
    }

    let offered = |level: SelectionLevel| {
        selection
            .value(level)
            .is_some_and(|code| options_for(level, releases, selection).iter().any(|o| o.value == code))
    };
    if !SelectionLevel::ALL.into_iter().all(offered) {
        tracing::debug!("selection no longer matches available options");
        return None;
    }

    let title = selection.title.as_ref()?;
    let release = releases.iter().find(|r| {
        r.game_id == title.game_id
            && Some(&r.platform) == selection.platform.as_ref()
            && Some(&r.region) == selection.region.as_ref()
            && Some(&r.edition) == selection.edition.as_ref()
    })?;

    let committed = CommittedRelease::new(release.clone());
    tracing::debug!(
        game_id = release.game_id,
        platform = release.platform.code(),
        region = release.region.code(),
        edition = release.edition.code(),
        manual_pages = committed.manual.page_count,
        "selection confirmed"
    );
    Some(committed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn releases() -> Vec<ReleaseRecord> {
        vec![
            ReleaseRecord::new(1, "A", "ps4", "us", "std"),
            ReleaseRecord::new(1, "A", "ps4", "eur", "std"),
            ReleaseRecord::new(1, "A", "ps4", "eur", "le"),
            ReleaseRecord::new(1, "A", "pc", "jp", "ce"),
            ReleaseRecord::new(2, "B", "ps4", "asia", "std"),
        ]
    }

    fn title_a() -> TitleChoice {
        TitleChoice { game_id: 1, title: "A".into() }
    }

    fn values(options: &[SelectOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn region_and_edition_cascade() {
        let releases = releases();
        let mut selection = SelectionState::new();
        selection.set_title(title_a());
        selection.set(SelectionLevel::Platform, "ps4", &releases).unwrap();

        let regions = options_for(SelectionLevel::Region, &releases, &selection);
        assert_eq!(values(&regions), vec!["us", "eur"]);

        selection.set(SelectionLevel::Region, "us", &releases).unwrap();
        let editions = options_for(SelectionLevel::Edition, &releases, &selection);
        assert_eq!(values(&editions), vec!["std"]);
        assert_eq!(editions[0].label, "Standard");
    }

    #[test]
    fn changing_title_resets_lower_levels() {
        let releases = releases();
        let mut selection = SelectionState::new();
        selection.set_title(title_a());
        selection.set(SelectionLevel::Platform, "ps4", &releases).unwrap();
        selection.set(SelectionLevel::Region, "eur", &releases).unwrap();
        selection.set(SelectionLevel::Edition, "le", &releases).unwrap();

        selection.set_title(TitleChoice { game_id: 2, title: "B".into() });
        assert!(selection.platform().is_none());
        assert!(selection.region().is_none());
        assert!(selection.edition().is_none());
    }

    #[test]
    fn changing_platform_keeps_title_clears_rest() {
        let releases = releases();
        let mut selection = SelectionState::new();
        selection.set_title(title_a());
        selection.set(SelectionLevel::Platform, "ps4", &releases).unwrap();
        selection.set(SelectionLevel::Region, "eur", &releases).unwrap();

        selection.set(SelectionLevel::Platform, "pc", &releases).unwrap();
        assert_eq!(selection.title(), Some(&title_a()));
        assert!(selection.region().is_none());
        assert_eq!(values(&options_for(SelectionLevel::Region, &releases, &selection)), vec!["jp"]);
    }

    #[test]
    fn edition_options_match_platform_and_region() {
        let releases = releases();
        let mut selection = SelectionState::new();
        selection.set_title(title_a());
        selection.set(SelectionLevel::Platform, "ps4", &releases).unwrap();
        selection.set(SelectionLevel::Region, "eur", &releases).unwrap();

        for option in options_for(SelectionLevel::Edition, &releases, &selection) {
            assert!(releases.iter().any(|r| r.game_id == 1
                && r.platform == Platform::Ps4
                && r.region == Region::Eur
                && r.edition.code() == option.value));
        }
    }

    #[test]
    fn mixed_case_unknown_codes_cascade_to_commit() {
        let releases = vec![ReleaseRecord::new(1, "A", "Dreamcast", "us", "Deluxe")];
        let mut selection = SelectionState::new();
        selection.set_title(title_a());
        assert_eq!(values(&options_for(SelectionLevel::Platform, &releases, &selection)), vec!["dreamcast"]);

        selection.set(SelectionLevel::Platform, "dreamcast", &releases).unwrap();
        assert_eq!(values(&options_for(SelectionLevel::Region, &releases, &selection)), vec!["us"]);

        selection.set(SelectionLevel::Region, "us", &releases).unwrap();
        selection.set(SelectionLevel::Edition, "DELUXE", &releases).unwrap();
        assert!(confirm_selection(&releases, &selection).is_some());
    }

    #[test]
    fn unavailable_value_is_rejected() {
        let releases = releases();
        let mut selection = SelectionState::new();
        selection.set_title(title_a());

        let err = selection.set(SelectionLevel::Platform, "switch", &releases).unwrap_err();
        assert!(matches!(err, GameLibraryError::Selection(_)));
        assert!(selection.platform().is_none());
    }

    #[test]
    fn options_without_parent_are_empty() {
        let releases = releases();
        let mut selection = SelectionState::new();
        assert!(options_for(SelectionLevel::Platform, &releases, &selection).is_empty());

        selection.set_title(title_a());
        assert!(options_for(SelectionLevel::Region, &releases, &selection).is_empty());
    }

    #[test]
    fn confirm_requires_complete_selection() {
        let releases = releases();
        let mut selection = SelectionState::new();
        selection.set_title(title_a());
        selection.set(SelectionLevel::Platform, "ps4", &releases).unwrap();
        selection.set(SelectionLevel::Region, "eur", &releases).unwrap();
        assert!(confirm_selection(&releases, &selection).is_none());

        selection.set(SelectionLevel::Edition, "le", &releases).unwrap();
        let committed = confirm_selection(&releases, &selection).unwrap();
        assert_eq!(committed.release.edition, Edition::Limited);
        assert_eq!(committed.manual.page_count, 0);
        assert!(!committed.has_additional());
    }

    #[test]
    fn confirm_fails_when_releases_change_underneath() {
        let releases = releases();
        let mut selection = SelectionState::new();
        selection.set_title(title_a());
        selection.set(SelectionLevel::Platform, "pc", &releases).unwrap();
        selection.set(SelectionLevel::Region, "jp", &releases).unwrap();
        selection.set(SelectionLevel::Edition, "ce", &releases).unwrap();

        assert!(confirm_selection(&releases[..3], &selection).is_none());
    }

    #[test]
    fn prefill_uses_clicked_row() {
        let releases = releases();
        let mut selection = SelectionState::new();

        assert!(selection.prefill_from_row(&releases[2], &releases));
        let committed = confirm_selection(&releases, &selection).unwrap();
        assert_eq!(committed.release, releases[2]);
    }

    #[test]
    fn prefill_stops_at_missing_level() {
        let mut selection = SelectionState::new();
        let row = ReleaseRecord::new(1, "A", "ps5", "us", "std");

        assert!(!selection.prefill_from_row(&row, &releases()));
        assert_eq!(selection.title().map(|t| t.game_id), Some(1));
        assert!(selection.platform().is_none());
    }
}
