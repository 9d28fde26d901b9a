//! Asset path convention and image store access.
//!
//! Images live in a static object store under a fixed layout:
//!
//! ```text
//! images/{platform}/{region}/{cover|disc|manual}/{platform}_{title}_{region}_{edition}[_suffix].jpg
//! ```
//!
//! The disc back is shared per platform (`images/{platform}/{region}/disc/{platform}_back.jpg`)
//! and manual pages carry a `manual_{n}` suffix, paired front/back.
//!
//! A missing image is never an error: [`AssetStore::resolve`] returns `None`
//! and the presentation layer falls back to a placeholder.

use crate::domain::ReleaseRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const IMAGE_EXT: &str = "jpg";

/// Face of the physical case an image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Cover,
    Disc,
    Manual,
}

impl AssetKind {
    const fn dir(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Disc => "disc",
            Self::Manual => "manual",
        }
    }
}

/// Builds the store path for one image of a release.
///
/// # Examples
///
/// ```
/// use game_library::catalog::assets::{asset_path, AssetKind};
/// use game_library::domain::ReleaseRecord;
///
/// let release = ReleaseRecord::new(1, "fallout4", "ps4", "us", "std");
/// assert_eq!(
///     asset_path(&release, AssetKind::Disc, Some("disc")),
///     "images/ps4/us/disc/ps4_fallout4_us_std_disc.jpg"
/// );
/// ```
#[must_use]
pub fn asset_path(release: &ReleaseRecord, kind: AssetKind, suffix: Option<&str>) -> String {
    let platform = release.platform.code();
    let region = release.region.code();
    let stem = format!(
        "{platform}_{}_{region}_{}",
        release.title_id,
        release.edition.code()
    );
    let file = match suffix {
        Some(suffix) => format!("{stem}_{suffix}.{IMAGE_EXT}"),
        None => format!("{stem}.{IMAGE_EXT}"),
    };
    format!("images/{platform}/{region}/{}/{file}", kind.dir())
}

#[must_use]
pub fn cover_path(release: &ReleaseRecord) -> String {
    asset_path(release, AssetKind::Cover, None)
}

#[must_use]
pub fn disc_path(release: &ReleaseRecord) -> String {
    asset_path(release, AssetKind::Disc, Some("disc"))
}

/// Path of the platform-wide disc back image.
#[must_use]
pub fn disc_back_path(release: &ReleaseRecord) -> String {
    let platform = release.platform.code();
    format!(
        "images/{platform}/{}/disc/{platform}_back.{IMAGE_EXT}",
        release.region.code()
    )
}

/// Path of manual page `number` (1-based).
#[must_use]
pub fn manual_page_path(release: &ReleaseRecord, number: u32) -> String {
    asset_path(release, AssetKind::Manual, Some(format!("manual_{number}").as_str()))
}

/// Front/back page paths for each physical leaf of a manual.
///
/// A manual of `page_count` pages has `ceil(page_count / 2)` leaves; leaf `i`
/// carries pages `2i + 1` and `2i + 2`.
#[must_use]
pub fn manual_leaf_paths(release: &ReleaseRecord, page_count: u32) -> Vec<(String, String)> {
    (0..page_count)
        .step_by(2)
        .map(|i| (manual_page_path(release, i + 1), manual_page_path(release, i + 2)))
        .collect()
}

/// Resolved public URLs for every image of a committed release.
///
/// `None` marks a missing image to be drawn as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUrls {
    pub cover: Option<String>,
    pub disc: Option<String>,
    pub disc_back: Option<String>,
    /// Front/back URLs per manual leaf.
    pub manual_leaves: Vec<(Option<String>, Option<String>)>,
}

impl AssetUrls {
    /// Probes every image of `release` against `store`.
    #[must_use]
    pub fn resolve(store: &dyn AssetStore, release: &ReleaseRecord, manual_pages: u32) -> Self {
        let _span = tracing::debug_span!("resolve_assets", game_id = release.game_id).entered();

        let manual_leaves = manual_leaf_paths(release, manual_pages)
            .iter()
            .map(|(front, back)| (store.resolve(front), store.resolve(back)))
            .collect();

        Self {
            cover: store.resolve(&cover_path(release)),
            disc: store.resolve(&disc_path(release)),
            disc_back: store.resolve(&disc_back_path(release)),
            manual_leaves,
        }
    }

    /// Number of images that resolved.
    #[must_use]
    pub fn found(&self) -> usize {
        let leaves: usize = self
            .manual_leaves
            .iter()
            .map(|(front, back)| usize::from(front.is_some()) + usize::from(back.is_some()))
            .sum();
        [&self.cover, &self.disc, &self.disc_back]
            .into_iter()
            .filter(|url| url.is_some())
            .count()
            + leaves
    }
}

/// Read access to the image store.
pub trait AssetStore: Send {
    /// Returns the public URL for a store path. Does not check existence.
    fn public_url(&self, path: &str) -> String;

    /// Probes whether a path resolves to a loadable image.
    ///
    /// Probe failures are reported as absent.
    fn exists(&self, path: &str) -> bool;

    /// Returns the public URL when the image exists, `None` otherwise.
    fn resolve(&self, path: &str) -> Option<String> {
        if self.exists(path) {
            Some(self.public_url(path))
        } else {
            tracing::debug!(path = %path, "asset missing, using placeholder");
            None
        }
    }
}

/// Image store backed by a local directory.
///
/// Store paths map onto `root`; public URLs are `base_url` joined with the
/// store path, or `file://` URLs when no base URL is configured.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
    base_url: Option<String>,
}

impl LocalAssetStore {
    #[must_use]
    pub fn new(root: PathBuf, base_url: Option<String>) -> Self {
        let base_url = base_url.map(|url| url.trim_end_matches('/').to_string());
        Self { root, base_url }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn local_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl AssetStore for LocalAssetStore {
    fn public_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        match &self.base_url {
            Some(base) => format!("{base}/{path}"),
            None => format!("file://{}", self.local_path(path).display()),
        }
    }

    fn exists(&self, path: &str) -> bool {
        match std::fs::metadata(self.local_path(path)) {
            Ok(metadata) => metadata.is_file(),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %path, error = %e, "asset probe failed");
                }
                false
            }
        }
    }
}
