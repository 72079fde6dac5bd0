//! Structured logging and OpenTelemetry tracing.
//!
//! ```text
//! tracing macros → tracing-subscriber (EnvFilter + fmt)
//!                → tracing-opentelemetry → opentelemetry_sdk → JSON-lines file
//! ```
//!
//! Trace level resolution: `RUST_LOG`, then the `trace_level` config option,
//! then `"info"`. File export is enabled only when `trace_file` is configured.
//!
//! # Modules
//!
//! - `init`: subscriber setup
//! - `exporter`: file-based span exporter with size rotation
//! - `context`: W3C trace context capture for outgoing requests

mod context;
mod exporter;
mod init;

pub use context::TraceContext;
pub use exporter::{JsonLinesExporter, DEFAULT_MAX_BYTES};
pub use init::init_tracing;
