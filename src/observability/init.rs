//! Tracing initialization and subscriber setup.

use super::exporter;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// The pipeline is:
/// 1. `EnvFilter` from `RUST_LOG`, falling back to `config.trace_level`, then `"info"`
/// 2. A compact stderr formatter
/// 3. When `config.trace_file` is set, an OpenTelemetry layer exporting spans
///    as JSON lines to that file
///
/// Safe to call more than once; only the first call takes effect. A trace file
/// whose directory cannot be created is skipped.
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let otel_layer = config.trace_file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return None;
            }
        }
        let provider = exporter::create_tracer_provider(path.clone(), "shopnow");
        let tracer = provider.tracer("shopnow");
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init();
}
