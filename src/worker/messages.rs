//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the driver
//! thread and the background worker that performs catalog fetches and asset
//! probes. It also implements distributed tracing context propagation across
//! the thread boundary.

use crate::catalog::AssetUrls;
use crate::domain::{Edition, Game, GameId, Platform, Region, ReleaseRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when no OpenTelemetry layer is installed.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id = format!("{:032x}", span_context.trace_id());
            let parent_span_id = format!("{:016x}", span_context.span_id());

            tracing::trace!(trace_id = %trace_id, parent_span_id = %parent_span_id, "capturing trace context");

            Some(Self {
                trace_id,
                parent_span_id,
            })
        } else {
            None
        }
    }
}

/// Generates builder methods for `WorkerMessage` variants.
///
/// Each builder attaches the current trace context to the message.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_catalog(LoadCatalog {}),
    load_games(LoadGames {}),
    load_releases(LoadReleases { game_id: GameId }),
    probe_assets(ProbeAssets { release: Box<ReleaseRecord>, manual_pages: u32 }),
}

/// Messages sent from the driver thread to the worker thread.
///
/// Each variant is one read against the repository or the asset store. All
/// variants carry an optional trace context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch every release joined with its title.
    LoadCatalog {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch every game ordered by title.
    LoadGames {
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Fetch the releases of one game.
    LoadReleases {
        game_id: GameId,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Resolve every image URL of a committed release.
    ProbeAssets {
        release: Box<ReleaseRecord>,

        /// Manual page count, for the manual leaf images.
        manual_pages: u32,

        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Stop the worker loop.
    Shutdown,
}

impl WorkerMessage {
    /// Trace context attached to the message, if any.
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadCatalog { trace_context }
            | Self::LoadGames { trace_context }
            | Self::LoadReleases { trace_context, .. }
            | Self::ProbeAssets { trace_context, .. } => trace_context.as_ref(),
            Self::Shutdown => None,
        }
    }
}

/// What a failed request was fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchScope {
    Catalog,
    Games,
    Releases { game_id: GameId },
    Assets,
}

impl fmt::Display for FetchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog => f.write_str("table data"),
            Self::Games => f.write_str("game list"),
            Self::Releases { game_id } => write!(f, "game releases for game {game_id}"),
            Self::Assets => f.write_str("images"),
        }
    }
}

/// Responses sent from the worker thread back to the driver thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorkerResponse {
    CatalogLoaded {
        releases: Arc<[ReleaseRecord]>,
    },

    GamesLoaded {
        games: Arc<[Game]>,
    },

    ReleasesLoaded {
        game_id: GameId,
        releases: Arc<[ReleaseRecord]>,
    },

    AssetsProbed {
        /// Identity of the release the URLs belong to.
        game_id: GameId,
        platform: Platform,
        region: Region,
        edition: Edition,
        urls: AssetUrls,
    },

    /// A request failed. Nothing was cached.
    Error {
        scope: FetchScope,

        /// Human-readable error message.
        message: String,
    },
}
