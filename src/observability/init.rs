//! Subscriber setup: `tracing` macros → OpenTelemetry → trace file.

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name recorded on every span.
pub const SERVICE_NAME: &str = "GameLibrary";

/// File name of the trace file inside the data directory.
pub const TRACE_FILE_NAME: &str = "game-library-otlp.json";

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, else `config.trace_level`, else
/// `"info"`. Spans are written to [`TRACE_FILE_NAME`] under the data directory
/// resolved from `config.data_dir`.
///
/// Returns the trace file path, or `None` when the data directory cannot be
/// created; tracing is optional and the app runs without it. Calling this
/// more than once leaves the first subscriber in place.
///
/// # Examples
///
/// ```no_run
/// use game_library::observability::init_tracing;
/// use game_library::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Config::default()
/// };
/// let trace_file = init_tracing(&config);
/// tracing::debug!(?trace_file, "tracing active");
/// ```
pub fn init_tracing(config: &Config) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let data_dir = get_data_dir(config.data_dir.as_deref());
    std::fs::create_dir_all(&data_dir).ok()?;

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let provider = tracer::create_tracer_provider(trace_file.clone(), resource, SERVICE_NAME);

    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();

    Some(trace_file)
}
