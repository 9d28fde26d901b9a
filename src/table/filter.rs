//! Per-column filter rules.
//!
//! Text columns match by case-insensitive substring against either the display
//! label or the raw code, so both `ps4` and `playstation` find PlayStation 4
//! releases. The genre rule is an exact case-insensitive membership test. The
//! date rule is an inclusive range with either bound open.
//!
//! An empty rule never excludes a record.

use crate::domain::ReleaseRecord;
use chrono::NaiveDate;

/// Text column a substring rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColumn {
    Title,
    Platform,
    Region,
    Edition,
}

impl TextColumn {
    pub const ALL: [Self; 4] = [Self::Title, Self::Platform, Self::Region, Self::Edition];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Platform => "Platform",
            Self::Region => "Region",
            Self::Edition => "Edition",
        }
    }

    /// Parses a column name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.label().eq_ignore_ascii_case(name.trim()))
    }
}

/// Inclusive release date bounds. `None` leaves that side unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Tests a release date against the bounds.
    ///
    /// An absent date fails as soon as either bound is set.
    #[must_use]
    pub fn contains(&self, date: Option<NaiveDate>) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(date) = date else {
            return false;
        };
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

/// Active filter rules for the release table.
///
/// # Examples
///
/// ```
/// use game_library::domain::ReleaseRecord;
/// use game_library::table::{FilterCriteria, TextColumn};
///
/// let mut filters = FilterCriteria::default();
/// filters.set_text(TextColumn::Title, "fall");
///
/// assert!(filters.matches(&ReleaseRecord::new(1, "Fallout 4", "ps4", "us", "std")));
/// assert!(!filters.matches(&ReleaseRecord::new(2, "Mafia", "pc", "us", "std")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub title: String,
    pub platform: String,
    pub region: String,
    pub edition: String,
    pub genre: String,
    pub dates: DateRange,
}

impl FilterCriteria {
    /// Whether no rule is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.platform.is_empty()
            && self.region.is_empty()
            && self.edition.is_empty()
            && self.genre.is_empty()
            && self.dates.is_open()
    }

    /// Replaces the rule for one text column.
    pub fn set_text(&mut self, column: TextColumn, value: impl Into<String>) {
        let value = value.into();
        match column {
            TextColumn::Title => self.title = value,
            TextColumn::Platform => self.platform = value,
            TextColumn::Region => self.region = value,
            TextColumn::Edition => self.edition = value,
        }
    }

    /// Returns the rule for one text column.
    #[must_use]
    pub fn text(&self, column: TextColumn) -> &str {
        match column {
            TextColumn::Title => &self.title,
            TextColumn::Platform => &self.platform,
            TextColumn::Region => &self.region,
            TextColumn::Edition => &self.edition,
        }
    }

    /// Tests a record against every active rule.
    #[must_use]
    pub fn matches(&self, record: &ReleaseRecord) -> bool {
        contains_ignore_case(&record.title, &self.title)
            && coded_matches(record.platform.label(), record.platform.code(), &self.platform)
            && coded_matches(record.region.label(), record.region.code(), &self.region)
            && coded_matches(record.edition.label(), record.edition.code(), &self.edition)
            && genre_matches(&record.genres, &self.genre)
            && self.dates.contains(record.release_date)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn coded_matches(label: &str, code: &str, needle: &str) -> bool {
    contains_ignore_case(label, needle) || contains_ignore_case(code, needle)
}

fn genre_matches(genres: &[String], target: &str) -> bool {
    let target = target.trim().to_lowercase();
    target.is_empty() || genres.iter().any(|genre| genre.to_lowercase() == target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, platform: &str, genres: &[&str], date: Option<(i32, u32, u32)>) -> ReleaseRecord {
        let mut record = ReleaseRecord::new(1, title, platform, "us", "std");
        record.genres = genres.iter().map(|g| (*g).to_string()).collect();
        record.release_date = date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        record
    }

    #[test]
    fn empty_criteria_match_everything() {
        let filters = FilterCriteria::default();
        assert!(filters.is_empty());
        assert!(filters.matches(&record("Anything", "pc", &[], None)));
    }

    #[test]
    fn platform_matches_label_or_code() {
        let ps4 = record("A", "ps4", &[], None);
        let mut filters = FilterCriteria::default();

        filters.set_text(TextColumn::Platform, "PlayStation");
        assert!(filters.matches(&ps4));
        filters.set_text(TextColumn::Platform, "PS4");
        assert!(filters.matches(&ps4));
        filters.set_text(TextColumn::Platform, "xbox");
        assert!(!filters.matches(&ps4));
        assert_eq!(filters.text(TextColumn::Platform), "xbox");
    }

    #[test]
    fn genre_is_exact_membership() {
        let rpg = record("A", "pc", &["RPG", "Action"], None);
        let mut filters = FilterCriteria { genre: "rpg".into(), ..FilterCriteria::default() };
        assert!(filters.matches(&rpg));

        filters.genre = "RP".into();
        assert!(!filters.matches(&rpg));
    }

    #[test]
    fn genre_ignores_case_beyond_ascii() {
        let accion = record("A", "pc", &["Acción"], None);
        let filters = FilterCriteria { genre: "ACCIÓN".into(), ..FilterCriteria::default() };
        assert!(filters.matches(&accion));
    }

    #[test]
    fn date_range_is_inclusive_with_open_bounds() {
        let day = |d| NaiveDate::from_ymd_opt(2020, 1, d);
        let range = DateRange { start: day(10), end: day(20) };

        assert!(range.contains(day(10)));
        assert!(range.contains(day(20)));
        assert!(!range.contains(day(21)));
        assert!(!range.contains(None));

        let open_end = DateRange { start: day(10), end: None };
        assert!(open_end.contains(NaiveDate::from_ymd_opt(2030, 1, 1)));
        assert!(DateRange::default().contains(None));
    }

    #[test]
    fn absent_date_fails_any_bound() {
        let undated = record("A", "pc", &[], None);
        let filters = FilterCriteria {
            dates: DateRange { start: None, end: NaiveDate::from_ymd_opt(2030, 1, 1) },
            ..FilterCriteria::default()
        };
        assert!(!filters.matches(&undated));
    }
}
