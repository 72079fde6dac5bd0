//! Trace context capture for outgoing requests.

use serde::{Deserialize, Serialize};

/// OpenTelemetry identifiers of the active span.
///
/// Captured right before an HTTP request is sent and rendered as a W3C
/// `traceparent` header so backend spans link to the client trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// Trace ID as 32 lowercase hex characters.
    pub trace_id: String,

    /// Span ID of the active span as 16 lowercase hex characters.
    pub parent_span_id: String,

    /// Whether the active span is sampled.
    pub sampled: bool,
}

impl TraceContext {
    /// Captures the context of the current `tracing` span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
            sampled: span_context.is_sampled(),
        })
    }

    /// Formats the context as a W3C `traceparent` header value.
    #[must_use]
    pub fn traceparent(&self) -> String {
        let flags = if self.sampled { "01" } else { "00" };
        format!("00-{}-{}-{flags}", self.trace_id, self.parent_span_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traceparent_layout() {
        let ctx = TraceContext {
            trace_id: "4bf92f3577b34da6a3ce929d0e0e4736".into(),
            parent_span_id: "00f067aa0ba902b7".into(),
            sampled: true,
        };
        assert_eq!(
            ctx.traceparent(),
            "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"
        );
    }

    #[test]
    fn no_context_without_otel_layer() {
        let span = tracing::info_span!("bare");
        let _guard = span.enter();
        assert!(TraceContext::from_current().is_none());
    }
}
