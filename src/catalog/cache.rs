//! Cache-aside repository over a [`CatalogSource`].
//!
//! Every query the application issues goes through one [`Memo`] per entity
//! type, keyed by query scope: the joined catalog and the game list are
//! cached once per session, releases are cached per `game_id`. A repeated
//! navigation to the same title therefore never re-fetches.
//!
//! Failed fetches are not cached; the next request retries the source.
//! Concurrent population is not guarded: the last write wins.

use crate::catalog::backend::CatalogSource;
use crate::domain::error::Result;
use crate::domain::{Edition, Game, GameId, Platform, Region, ReleaseRecord};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

/// Fetch-and-memoize primitive keyed by query scope.
///
/// # Examples
///
/// ```
/// use game_library::catalog::Memo;
///
/// let mut memo: Memo<u32, String> = Memo::new();
/// let value = memo.get_or_try_fetch(1, || Ok("one".to_string()))?;
/// assert_eq!(value, "one");
///
/// // Second lookup is served from the cache.
/// let value = memo.get_or_try_fetch(1, || unreachable!())?;
/// assert_eq!(value, "one");
/// # Ok::<(), game_library::domain::GameLibraryError>(())
/// ```
#[derive(Debug)]
pub struct Memo<K, V> {
    entries: HashMap<K, V>,
    misses: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            misses: 0,
        }
    }
}

impl<K: Eq + Hash, V: Clone> Memo<K, V> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached value for `key`, fetching and storing it on a miss.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged. Nothing is cached in that case.
    pub fn get_or_try_fetch<F>(&mut self, key: K, fetch: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        if let Some(value) = self.entries.get(&key) {
            return Ok(value.clone());
        }

        self.misses += 1;
        let value = fetch()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// Returns the cached value without fetching.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    /// Number of lookups that reached the fetch closure.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }
}

/// Session repository combining a data source with per-scope caches.
pub struct CatalogRepository {
    source: Box<dyn CatalogSource>,
    catalog: Memo<(), Arc<[ReleaseRecord]>>,
    games: Memo<(), Arc<[Game]>>,
    releases: Memo<GameId, Arc<[ReleaseRecord]>>,
}

impl CatalogRepository {
    #[must_use]
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        Self {
            source,
            catalog: Memo::new(),
            games: Memo::new(),
            releases: Memo::new(),
        }
    }

    /// Returns every release joined with its title.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is not cached and the source fails.
    pub fn catalog(&mut self) -> Result<Arc<[ReleaseRecord]>> {
        let source = &self.source;
        self.catalog.get_or_try_fetch((), || {
            let _span = tracing::debug_span!("repository_fetch_catalog").entered();
            Ok(dedupe_releases(source.fetch_catalog()?).into())
        })
    }

    /// Returns every game ordered by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is not cached and the source fails.
    pub fn games(&mut self) -> Result<Arc<[Game]>> {
        let source = &self.source;
        self.games.get_or_try_fetch((), || {
            let _span = tracing::debug_span!("repository_fetch_games").entered();
            Ok(source.fetch_games_ordered()?.into())
        })
    }

    /// Returns the releases of one game.
    ///
    /// # Errors
    ///
    /// Returns an error if the releases are not cached and the source fails.
    pub fn releases_for(&mut self, game_id: GameId) -> Result<Arc<[ReleaseRecord]>> {
        let source = &self.source;
        self.releases.get_or_try_fetch(game_id, || {
            let _span = tracing::debug_span!("repository_fetch_releases", game_id = game_id).entered();
            Ok(dedupe_releases(source.fetch_releases_for_game(game_id)?).into())
        })
    }

    /// Whether the releases for `game_id` are already cached.
    #[must_use]
    pub fn has_releases(&self, game_id: GameId) -> bool {
        self.releases.get(&game_id).is_some()
    }

    /// Total number of lookups that reached the data source.
    #[must_use]
    pub const fn source_fetches(&self) -> u64 {
        self.catalog.misses() + self.games.misses() + self.releases.misses()
    }
}

/// Drops releases whose identity tuple was already seen, keeping the first.
fn dedupe_releases(records: Vec<ReleaseRecord>) -> Vec<ReleaseRecord> {
    let mut seen: HashSet<(GameId, Platform, Region, Edition)> = HashSet::with_capacity(records.len());

    records
        .into_iter()
        .filter(|record| {
            let key = (
                record.game_id,
                record.platform.clone(),
                record.region.clone(),
                record.edition.clone(),
            );
            let fresh = seen.insert(key);
            if !fresh {
                tracing::warn!(
                    game_id = record.game_id,
                    platform = record.platform.code(),
                    region = record.region.code(),
                    edition = record.edition.code(),
                    "dropping duplicate release"
                );
            }
            fresh
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GameLibraryError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        releases: Vec<ReleaseRecord>,
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CatalogSource for CountingSource {
        fn fetch_games_ordered(&self) -> Result<Vec<Game>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Game { id: 1, title: "A".into() }])
        }

        fn fetch_releases_for_game(&self, game_id: GameId) -> Result<Vec<ReleaseRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GameLibraryError::Source("offline".into()));
            }
            Ok(self.releases.iter().filter(|r| r.game_id == game_id).cloned().collect())
        }

        fn fetch_catalog(&self) -> Result<Vec<ReleaseRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(GameLibraryError::Source("offline".into()));
            }
            Ok(self.releases.clone())
        }
    }

    fn repository(fail: bool) -> (CatalogRepository, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            releases: vec![
                ReleaseRecord::new(1, "A", "ps4", "us", "std"),
                ReleaseRecord::new(1, "A", "ps4", "eur", "std"),
                ReleaseRecord::new(1, "A", "ps4", "us", "std"),
                ReleaseRecord::new(2, "B", "pc", "us", "std"),
            ],
            calls: Arc::clone(&calls),
            fail,
        };
        (CatalogRepository::new(Box::new(source)), calls)
    }

    #[test]
    fn repeated_lookup_hits_cache() {
        let (mut repo, calls) = repository(false);

        let first = repo.releases_for(1).unwrap();
        let second = repo.releases_for(1).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(repo.has_releases(1));
        assert!(!repo.has_releases(2));
    }

    #[test]
    fn duplicates_are_dropped() {
        let (mut repo, _) = repository(false);
        let catalog = repo.catalog().unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog[2].title, "B");
    }

    #[test]
    fn unknown_codes_dedupe_across_case() {
        let records = dedupe_releases(vec![
            ReleaseRecord::new(3, "C", "Dreamcast", "us", "std"),
            ReleaseRecord::new(3, "C", "dreamcast", "US", "STD"),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].platform.code(), "dreamcast");
    }

    #[test]
    fn failures_are_not_cached() {
        let (mut repo, calls) = repository(true);

        assert!(repo.catalog().is_err());
        assert!(repo.catalog().is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(repo.source_fetches(), 2);
    }

    #[test]
    fn memo_fetches_once_and_skips_failures() {
        let mut memo: Memo<&str, u32> = Memo::new();
        assert!(memo
            .get_or_try_fetch("bad", || Err(GameLibraryError::Source("down".into())))
            .is_err());
        assert!(memo.get(&"bad").is_none());

        assert_eq!(memo.get_or_try_fetch("k", || Ok(1)).unwrap(), 1);
        assert_eq!(memo.get_or_try_fetch("k", || Ok(2)).unwrap(), 1);
        assert_eq!(memo.get(&"k"), Some(&1));
        assert_eq!(memo.misses(), 2);
    }
}
