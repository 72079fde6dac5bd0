//! OpenTelemetry span exporter writing OTLP-shaped JSON lines to a file.
//!
//! Each exported batch becomes one line. When the file grows past the size
//! cap it is moved aside to `<file>.1` (replacing any older backup) and a
//! fresh file is started.

use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Value as JsonValue};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default size cap of the trace file before rotation (10 MB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug)]
pub struct JsonLinesExporter {
    path: PathBuf,
    max_bytes: u64,
    service_name: String,
    is_shutdown: AtomicBool,
}

impl JsonLinesExporter {
    #[must_use]
    pub fn new(path: PathBuf, service_name: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            service_name: service_name.into(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Formats a batch as a single OTLP-shaped JSON document.
    #[must_use]
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();
        json!({
            "resourceSpans": [{
                "resource": {
                    "attributes": [{
                        "key": "service.name",
                        "value": { "stringValue": self.service_name }
                    }]
                },
                "scopeSpans": [{
                    "scope": { "name": self.service_name },
                    "spans": spans
                }]
            }]
        })
    }

    /// Appends one line, rotating first if the file is over the cap.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from rotation, opening or writing.
    pub fn write_line(&self, line: &str) -> std::io::Result<()> {
        rotate_if_needed(&self.path, self.max_bytes)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")?;
        file.flush()
    }
}

impl SpanExporter for JsonLinesExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let line = self.format_batch(&batch).to_string();
        let result = self
            .write_line(&line)
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

fn rotate_if_needed(path: &Path, max_bytes: u64) -> std::io::Result<()> {
    let Ok(metadata) = fs::metadata(path) else {
        return Ok(());
    };
    if metadata.len() <= max_bytes {
        return Ok(());
    }
    let mut backup = path.as_os_str().to_owned();
    backup.push(".1");
    fs::rename(path, PathBuf::from(backup))
}

fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

fn format_span(span: &SpanData) -> JsonValue {
    let attributes: Vec<JsonValue> = span
        .attributes
        .iter()
        .map(|kv| json!({ "key": kv.key.as_str(), "value": { "stringValue": kv.value.to_string() } }))
        .collect();

    let (code, message) = match &span.status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    };

    let parent = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "name": span.name,
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes,
        "status": { "code": code, "message": message },
    })
}

/// Builds a tracer provider exporting synchronously to `path`.
pub fn create_tracer_provider(path: PathBuf, service_name: &str) -> TracerProvider {
    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        service_name.to_string(),
    )]);
    let exporter = JsonLinesExporter::new(path, service_name, DEFAULT_MAX_BYTES);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
