//! Column sorting.
//!
//! Ordering is stable: records comparing equal keep their catalog order.
//! Descending order reverses the comparator rather than the sorted list, so
//! ties stay in catalog order in both directions.

use crate::domain::ReleaseRecord;
use std::cmp::Ordering;

/// Sortable table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    #[default]
    Title,
    Platform,
    Region,
    Edition,
    ReleaseDate,
    Genres,
}

impl SortKey {
    /// Every column, in header order.
    pub const ALL: [Self; 6] = [
        Self::Title,
        Self::Platform,
        Self::Region,
        Self::Edition,
        Self::ReleaseDate,
        Self::Genres,
    ];

    /// Header text for the column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Platform => "Platform",
            Self::Region => "Region",
            Self::Edition => "Edition",
            Self::ReleaseDate => "Release Date",
            Self::Genres => "Genres",
        }
    }

    /// Parses a column name as typed by the driver (`title`, `release_date`, ...).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "title" => Some(Self::Title),
            "platform" => Some(Self::Platform),
            "region" => Some(Self::Region),
            "edition" => Some(Self::Edition),
            "release_date" | "date" | "releasedate" => Some(Self::ReleaseDate),
            "genres" | "genre" => Some(Self::Genres),
            _ => None,
        }
    }

    /// Compares two records on this column in ascending order.
    #[must_use]
    pub fn compare(self, a: &ReleaseRecord, b: &ReleaseRecord) -> Ordering {
        match self {
            Self::Title => cmp_ignore_case(&a.title, &b.title),
            Self::Platform => cmp_ignore_case(a.platform.label(), b.platform.label()),
            Self::Region => cmp_ignore_case(a.region.label(), b.region.label()),
            Self::Edition => cmp_ignore_case(a.edition.label(), b.edition.label()),
            // `None` orders before any date.
            Self::ReleaseDate => a.release_date.cmp(&b.release_date),
            Self::Genres => genres_key(&a.genres).cmp(&genres_key(&b.genres)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Header indicator for the direction.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Asc => "▲",
            Self::Desc => "▼",
        }
    }
}

/// Active sort column and direction. Defaults to title ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Applies a header click.
    ///
    /// Reselecting the active column while ascending switches to descending;
    /// anything else sorts the clicked column ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// use game_library::table::{SortDirection, SortKey, SortSpec};
    ///
    /// let mut spec = SortSpec::default();
    /// spec.toggle(SortKey::Title);
    /// assert_eq!(spec.direction, SortDirection::Desc);
    /// spec.toggle(SortKey::Title);
    /// assert_eq!(spec.direction, SortDirection::Asc);
    /// spec.toggle(SortKey::Region);
    /// assert_eq!(spec, SortSpec::new(SortKey::Region, SortDirection::Asc));
    /// ```
    pub fn toggle(&mut self, key: SortKey) {
        self.direction = if self.key == key && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.key = key;
    }

    /// Compares two records under this spec.
    #[must_use]
    pub fn compare(&self, a: &ReleaseRecord, b: &ReleaseRecord) -> Ordering {
        match self.direction {
            SortDirection::Asc => self.key.compare(a, b),
            SortDirection::Desc => self.key.compare(b, a),
        }
    }

    /// Sorts records in place, preserving the relative order of ties.
    pub fn sort(&self, records: &mut [&ReleaseRecord]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn genres_key(genres: &[String]) -> String {
    genres.join(",").to_lowercase()
}
