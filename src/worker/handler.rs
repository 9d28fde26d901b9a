//! Worker thread implementation for catalog fetches and asset probes.
//!
//! The worker owns the [`CatalogRepository`] and the [`AssetStore`], so all
//! source I/O and every cache write happen on one background thread while the
//! driver thread keeps processing input. It includes distributed tracing
//! support for cross-thread observability.

use crate::catalog::{AssetStore, AssetUrls, CatalogRepository};
use crate::domain::error::{GameLibraryError, Result};
use crate::domain::{GameId, ReleaseRecord};
use crate::worker::messages::FetchScope;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

/// Worker state for handling fetch operations.
pub struct CatalogWorker {
    repository: CatalogRepository,
    assets: Box<dyn AssetStore>,
}

impl CatalogWorker {
    #[must_use]
    pub fn new(repository: CatalogRepository, assets: Box<dyn AssetStore>) -> Self {
        Self { repository, assets }
    }

    /// Helper for handling repository results with consistent logging.
    fn handle_fetch_result<T, F>(scope: FetchScope, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(scope = %scope, "fetch successful");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(scope = %scope, error = %e, "fetch failed");
                WorkerResponse::Error {
                    scope,
                    message: format!("Unable to fetch {scope}: {e}"),
                }
            }
        }
    }

    fn handle_load_catalog(&mut self) -> WorkerResponse {
        Self::handle_fetch_result(FetchScope::Catalog, self.repository.catalog(), |releases| {
            tracing::debug!(release_count = releases.len(), "catalog loaded");
            WorkerResponse::CatalogLoaded { releases }
        })
    }

    fn handle_load_games(&mut self) -> WorkerResponse {
        Self::handle_fetch_result(FetchScope::Games, self.repository.games(), |games| {
            tracing::debug!(game_count = games.len(), "games loaded");
            WorkerResponse::GamesLoaded { games }
        })
    }

    fn handle_load_releases(&mut self, game_id: GameId) -> WorkerResponse {
        let cached = self.repository.has_releases(game_id);
        let result = self.repository.releases_for(game_id);
        let source_fetches = self.repository.source_fetches();
        Self::handle_fetch_result(
            FetchScope::Releases { game_id },
            result,
            |releases| {
                tracing::debug!(
                    game_id = game_id,
                    release_count = releases.len(),
                    cached = cached,
                    source_fetches = source_fetches,
                    "releases loaded"
                );
                WorkerResponse::ReleasesLoaded { game_id, releases }
            },
        )
    }

    fn handle_probe_assets(&self, release: &ReleaseRecord, manual_pages: u32) -> WorkerResponse {
        let urls = AssetUrls::resolve(self.assets.as_ref(), release, manual_pages);
        tracing::debug!(found = urls.found(), "assets probed");

        WorkerResponse::AssetsProbed {
            game_id: release.game_id,
            platform: release.platform.clone(),
            region: release.region.clone(),
            edition: release.edition.clone(),
            urls,
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = message.trace_context()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response.
    ///
    /// Returns `None` for [`WorkerMessage::Shutdown`].
    pub fn handle_message(&mut self, message: WorkerMessage) -> Option<WorkerResponse> {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        let response = match message {
            WorkerMessage::LoadCatalog { .. } => self.handle_load_catalog(),
            WorkerMessage::LoadGames { .. } => self.handle_load_games(),
            WorkerMessage::LoadReleases { game_id, .. } => self.handle_load_releases(game_id),
            WorkerMessage::ProbeAssets { release, manual_pages, .. } => {
                self.handle_probe_assets(&release, manual_pages)
            }
            WorkerMessage::Shutdown => return None,
        };
        Some(response)
    }

    /// Moves the worker onto a background thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn(mut self) -> Result<WorkerHandle> {
        let (message_tx, message_rx) = mpsc::channel::<WorkerMessage>();
        let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>();

        let join = std::thread::Builder::new()
            .name("catalog-worker".to_string())
            .spawn(move || {
                tracing::debug!("worker thread started");
                while let Ok(message) = message_rx.recv() {
                    let Some(response) = self.handle_message(message) else {
                        break;
                    };
                    if response_tx.send(response).is_err() {
                        tracing::debug!("driver hung up, stopping worker");
                        break;
                    }
                }
                tracing::debug!("worker thread stopped");
            })?;

        Ok(WorkerHandle {
            sender: message_tx,
            receiver: response_rx,
            join: Some(join),
        })
    }
}

/// Driver-side endpoint of a spawned worker.
pub struct WorkerHandle {
    sender: Sender<WorkerMessage>,
    receiver: Receiver<WorkerResponse>,
    join: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues a message for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`GameLibraryError::Worker`] if the worker has stopped.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.sender
            .send(message)
            .map_err(|e| GameLibraryError::Worker(format!("worker is not running: {e}")))
    }

    /// Returns a response if one is ready.
    ///
    /// # Errors
    ///
    /// Returns [`GameLibraryError::Worker`] if the worker has stopped.
    pub fn try_recv(&self) -> Result<Option<WorkerResponse>> {
        match self.receiver.try_recv() {
            Ok(response) => Ok(Some(response)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(GameLibraryError::Worker("worker disconnected".to_string())),
        }
    }

    /// Waits up to `timeout` for a response.
    ///
    /// # Errors
    ///
    /// Returns [`GameLibraryError::Worker`] if the worker has stopped.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<WorkerResponse>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(response) => Ok(Some(response)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(GameLibraryError::Worker("worker disconnected".to_string())),
        }
    }

    /// Stops the worker and waits for its thread to exit.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.sender.send(WorkerMessage::Shutdown);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                tracing::warn!("worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{JsonCatalogSource, LocalAssetStore};
    use std::path::PathBuf;

    const EXPORT: &str = r#"{
        "games": [{"id": 1, "title": "fallout4", "title_text": "Fallout 4"}],
        "game_releases": [
            {"game_id": 1, "platform": "ps4", "region": "us", "edition": "std",
             "included_items": [{"item": "manual", "number_of_pages": 4}]}
        ]
    }"#;

    fn worker() -> CatalogWorker {
        let source = JsonCatalogSource::from_json(EXPORT).unwrap();
        CatalogWorker::new(
            CatalogRepository::new(Box::new(source)),
            Box::new(LocalAssetStore::new(PathBuf::from("/nonexistent"), None)),
        )
    }

    #[test]
    fn loads_catalog_and_caches_releases() {
        let mut worker = worker();

        let response = worker.handle_message(WorkerMessage::load_catalog()).unwrap();
        assert!(matches!(response, WorkerResponse::CatalogLoaded { ref releases } if releases.len() == 1));

        worker.handle_message(WorkerMessage::load_releases(1)).unwrap();
        worker.handle_message(WorkerMessage::load_releases(1)).unwrap();
        assert_eq!(worker.repository.source_fetches(), 2);
    }

    #[test]
    fn missing_assets_probe_to_placeholders() {
        let mut worker = worker();
        let release = ReleaseRecord::new(1, "fallout4", "ps4", "us", "std");

        let response = worker
            .handle_message(WorkerMessage::probe_assets(Box::new(release), 4))
            .unwrap();
        let WorkerResponse::AssetsProbed { urls, .. } = response else {
            panic!("unexpected response: {response:?}");
        };
        assert_eq!(urls.found(), 0);
        assert_eq!(urls.manual_leaves.len(), 2);
    }

    #[test]
    fn spawned_worker_round_trip() {
        let handle = worker().spawn().unwrap();
        handle.post(WorkerMessage::load_games()).unwrap();

        let response = handle.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        assert!(matches!(response, WorkerResponse::GamesLoaded { ref games } if games[0].title == "Fallout 4"));
        handle.shutdown();
    }
}
