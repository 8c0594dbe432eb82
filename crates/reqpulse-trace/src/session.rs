//! Per-request trace handle.
//!
//! One [`RequestTrace`] is created per outbound request and exclusively owns
//! that request's timer context. The HTTP client integration calls the
//! matching hook method at each lifecycle point. Dropping the handle (on
//! success, error, or cancellation alike) discards any unread start marks.

use std::sync::Arc;

use bytes::Bytes;
use url::Url;

use reqpulse_core::context::RequestTraceContext;
use reqpulse_core::phase::{Phase, PhaseParams};

use crate::dispatch::TraceDispatcher;

pub struct RequestTrace {
    dispatcher: Arc<TraceDispatcher>,
    ctx: RequestTraceContext,
}

impl RequestTrace {
    pub fn new(dispatcher: Arc<TraceDispatcher>) -> Self {
        Self {
            dispatcher,
            ctx: RequestTraceContext::new(),
        }
    }

    async fn fire(&mut self, phase: Phase, params: PhaseParams) {
        self.dispatcher.dispatch(&mut self.ctx, phase, &params).await;
    }

    pub async fn on_request_start(&mut self) {
        self.fire(Phase::RequestStart, PhaseParams::None).await;
    }

    pub async fn on_request_end(&mut self, url: &Url) {
        self.fire(Phase::RequestEnd, PhaseParams::Url { url: url.clone() })
            .await;
    }

    pub async fn on_request_redirect(&mut self, url: &Url) {
        self.fire(Phase::RequestRedirect, PhaseParams::Url { url: url.clone() })
            .await;
    }

    /// `kind` is the failure's category name; see [`error_kind_of`].
    pub async fn on_request_exception(&mut self, url: &Url, kind: &str) {
        self.fire(
            Phase::RequestException,
            PhaseParams::Exception {
                url: url.clone(),
                kind: kind.to_string(),
            },
        )
        .await;
    }

    pub async fn on_connection_queued_start(&mut self) {
        self.fire(Phase::ConnectionQueuedStart, PhaseParams::None).await;
    }

    pub async fn on_connection_queued_end(&mut self) {
        self.fire(Phase::ConnectionQueuedEnd, PhaseParams::None).await;
    }

    pub async fn on_connection_create_start(&mut self) {
        self.fire(Phase::ConnectionCreateStart, PhaseParams::None).await;
    }

    pub async fn on_connection_create_end(&mut self) {
        self.fire(Phase::ConnectionCreateEnd, PhaseParams::None).await;
    }

    pub async fn on_connection_reuseconn(&mut self) {
        self.fire(Phase::ConnectionReuseconn, PhaseParams::None).await;
    }

    pub async fn on_dns_resolvehost_start(&mut self, host: &str) {
        self.fire(
            Phase::DnsResolvehostStart,
            PhaseParams::Host { host: host.to_string() },
        )
        .await;
    }

    pub async fn on_dns_resolvehost_end(&mut self, host: &str) {
        self.fire(
            Phase::DnsResolvehostEnd,
            PhaseParams::Host { host: host.to_string() },
        )
        .await;
    }

    pub async fn on_dns_cache_hit(&mut self, host: &str) {
        self.fire(
            Phase::DnsCacheHit,
            PhaseParams::Host { host: host.to_string() },
        )
        .await;
    }

    pub async fn on_dns_cache_miss(&mut self, host: &str) {
        self.fire(
            Phase::DnsCacheMiss,
            PhaseParams::Host { host: host.to_string() },
        )
        .await;
    }

    pub async fn on_response_chunk_received(&mut self, url: &Url, chunk: Bytes) {
        self.fire(
            Phase::ResponseChunkReceived,
            PhaseParams::Chunk {
                url: url.clone(),
                chunk,
            },
        )
        .await;
    }

    /// Unread start marks in this request's context.
    pub fn pending_marks(&self) -> usize {
        self.ctx.pending()
    }
}

/// Failure category tag derived from an error's type name: the last path
/// segment of `std::any::type_name`.
pub fn error_kind_of<E: ?Sized>(_err: &E) -> &'static str {
    let name = std::any::type_name::<E>();
    name.rsplit("::").next().unwrap_or(name)
}
