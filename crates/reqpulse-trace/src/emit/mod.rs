//! Best-effort stats emission.
//!
//! Encoded lines are handed to a [`StatsSink`]; the emitter logs and
//! swallows sink failures so telemetry can never slow down or fail the
//! request it rides on. Loss is acceptable.

pub mod udp;

pub use udp::UdpSink;

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use reqpulse_core::error::Result;
use reqpulse_core::wire::{encode_line, MetricValue};

/// Transport for encoded metric lines.
#[async_trait]
pub trait StatsSink: Send + Sync {
    async fn send_line(&self, line: &str) -> Result<()>;
}

/// Collects lines in memory instead of sending them. Used by the
/// integration tests and for local debugging of hook wiring.
#[derive(Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far, in send order.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl StatsSink for MemorySink {
    async fn send_line(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
        Ok(())
    }
}

/// Encodes measurements and pushes them through the sink.
///
/// Transport failures are logged at `warn` and dropped here; callers never
/// see them.
#[derive(Clone)]
pub struct StatsEmitter {
    sink: Arc<dyn StatsSink>,
}

impl StatsEmitter {
    pub fn new(sink: Arc<dyn StatsSink>) -> Self {
        Self { sink }
    }

    /// Encode and send one measurement, fire-and-forget.
    pub async fn send(&self, name: &str, value: MetricValue, tags: &[(&str, MetricValue)]) {
        let line = encode_line(name, &value, tags);
        match self.sink.send_line(&line).await {
            Ok(()) => {
                tracing::debug!(metric = name, value = %value, ?tags, "reported stats");
            }
            Err(e) => {
                tracing::warn!(metric = name, error = %e, "stats emission failed");
            }
        }
    }
}
