//! Outbound request lifecycle phases and their hook payloads.
//!
//! The phase set mirrors the trace hooks exposed by connection-pooling HTTP
//! clients: paired `*Start`/`*End` phases bracket a timed section, the rest
//! are single-shot events that count an occurrence or record a size.

use bytes::Bytes;
use url::Url;

/// A named point in an outbound HTTP request's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    RequestStart,
    RequestEnd,
    RequestRedirect,
    RequestException,
    ConnectionQueuedStart,
    ConnectionQueuedEnd,
    ConnectionCreateStart,
    ConnectionCreateEnd,
    ConnectionReuseconn,
    DnsResolvehostStart,
    DnsResolvehostEnd,
    DnsCacheHit,
    DnsCacheMiss,
    ResponseChunkReceived,
}

impl Phase {
    /// Every phase, in lifecycle order. Used to register catch-all observers.
    pub const ALL: [Phase; 14] = [
        Phase::RequestStart,
        Phase::RequestEnd,
        Phase::RequestRedirect,
        Phase::RequestException,
        Phase::ConnectionQueuedStart,
        Phase::ConnectionQueuedEnd,
        Phase::ConnectionCreateStart,
        Phase::ConnectionCreateEnd,
        Phase::ConnectionReuseconn,
        Phase::DnsResolvehostStart,
        Phase::DnsResolvehostEnd,
        Phase::DnsCacheHit,
        Phase::DnsCacheMiss,
        Phase::ResponseChunkReceived,
    ];

    /// Stable snake_case name, used in logs and timer diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::RequestStart => "request_start",
            Phase::RequestEnd => "request_end",
            Phase::RequestRedirect => "request_redirect",
            Phase::RequestException => "request_exception",
            Phase::ConnectionQueuedStart => "connection_queued_start",
            Phase::ConnectionQueuedEnd => "connection_queued_end",
            Phase::ConnectionCreateStart => "connection_create_start",
            Phase::ConnectionCreateEnd => "connection_create_end",
            Phase::ConnectionReuseconn => "connection_reuseconn",
            Phase::DnsResolvehostStart => "dns_resolvehost_start",
            Phase::DnsResolvehostEnd => "dns_resolvehost_end",
            Phase::DnsCacheHit => "dns_cache_hit",
            Phase::DnsCacheMiss => "dns_cache_miss",
            Phase::ResponseChunkReceived => "response_chunk_received",
        }
    }

    /// For an end phase, the start phase whose mark it consumes.
    pub fn paired_start(self) -> Option<Phase> {
        match self {
            Phase::RequestEnd => Some(Phase::RequestStart),
            Phase::ConnectionQueuedEnd => Some(Phase::ConnectionQueuedStart),
            Phase::ConnectionCreateEnd => Some(Phase::ConnectionCreateStart),
            Phase::DnsResolvehostEnd => Some(Phase::DnsResolvehostStart),
            _ => None,
        }
    }

    /// Metric name suffix for phases that emit a measurement; `None` for
    /// bare start marks. The full metric name is `<transport>_<suffix>`.
    pub fn metric_suffix(self) -> Option<&'static str> {
        match self {
            Phase::RequestEnd => Some("request_exec_time"),
            Phase::RequestRedirect => Some("request_redirect"),
            Phase::RequestException => Some("request_exception"),
            Phase::ConnectionQueuedEnd => Some("connection_queued_time"),
            Phase::ConnectionCreateEnd => Some("connection_create_time"),
            Phase::ConnectionReuseconn => Some("connection_reuseconn"),
            Phase::DnsResolvehostEnd => Some("dns_resolvehost_time"),
            Phase::DnsCacheHit => Some("dns_cache_hit"),
            Phase::DnsCacheMiss => Some("dns_cache_miss"),
            Phase::ResponseChunkReceived => Some("response_chunk_received"),
            Phase::RequestStart
            | Phase::ConnectionQueuedStart
            | Phase::ConnectionCreateStart
            | Phase::DnsResolvehostStart => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Phase-specific payload delivered with each hook invocation.
///
/// Connection queue/create phases carry no payload: by the time a pooled
/// connection is being acquired the target host is not part of the hook
/// parameters, so those durations go out untagged.
#[derive(Debug, Clone)]
pub enum PhaseParams {
    /// No payload.
    None,
    /// DNS phases carry the host being resolved.
    Host { host: String },
    /// Request end / redirect carry the request URL.
    Url { url: Url },
    /// Exception phases additionally carry the failure's category name.
    Exception { url: Url, kind: String },
    /// Chunk delivery carries the chunk itself (zero-copy); observers only
    /// read its length.
    Chunk { url: Url, chunk: Bytes },
}

impl PhaseParams {
    /// Host component for the `domain` tag, when one is available.
    pub fn domain(&self) -> Option<&str> {
        match self {
            PhaseParams::None => None,
            PhaseParams::Host { host } => Some(host.as_str()),
            PhaseParams::Url { url }
            | PhaseParams::Exception { url, .. }
            | PhaseParams::Chunk { url, .. } => url.host_str(),
        }
    }
}
