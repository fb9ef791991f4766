//! Worker thread message types for cross-thread communication.
//!
//! This module defines the request and response protocol between the main plugin
//! thread and the background worker that decodes response bodies. It also carries
//! distributed tracing context across the thread boundary.

use crate::fetch::{FetchOutcome, RequestId};
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so the worker's
/// decode span is parented to the plugin span that received the response.
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
    /// Returns `None` if the current span context is invalid or not sampled.
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
        })
    }
}

/// Messages sent from the main thread to the worker thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Decode a completed response body into view records.
    ParseCountries {
        /// Request the body belongs to.
        request_id: RequestId,

        /// HTTP status reported by the host.
        status: u16,

        /// Raw response body (lossy UTF-8).
        body: String,

        /// Client-side name filter to apply after decoding.
        name_filter: Option<String>,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `ParseCountries` message with the current trace context.
    #[must_use]
    pub fn parse_countries(
        request_id: RequestId,
        status: u16,
        body: String,
        name_filter: Option<String>,
    ) -> Self {
        Self::ParseCountries {
            request_id,
            status,
            body,
            name_filter,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Request the message belongs to.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        match self {
            Self::ParseCountries { request_id, .. } => *request_id,
        }
    }

    /// Best-effort request id from a payload that failed to deserialize.
    ///
    /// Lets the worker attribute an error to the right request even when the
    /// rest of the message is unreadable.
    #[must_use]
    pub fn request_id_from_payload(payload: &str) -> Option<RequestId> {
        let value: serde_json::Value = serde_json::from_str(payload).ok()?;
        serde_json::from_value(value.get("ParseCountries")?.get("request_id")?.clone()).ok()
    }

    /// Trace context attached to the message, if any.
    #[must_use]
    pub fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::ParseCountries { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent from the worker thread back to the main thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// A body was decoded.
    CountriesParsed {
        /// Request the outcome belongs to.
        request_id: RequestId,

        /// Decoded and filtered result.
        outcome: FetchOutcome,
    },

    /// The worker could not process a message.
    Error {
        /// Request the failed message belonged to, when it could be recovered.
        request_id: Option<RequestId>,

        /// Human-readable error message.
        message: String,
    },
}
