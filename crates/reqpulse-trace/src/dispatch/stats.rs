//! Built-in observer: one emitted measurement per observed phase transition.

use async_trait::async_trait;

use reqpulse_core::context::RequestTraceContext;
use reqpulse_core::error::Result;
use reqpulse_core::phase::{Phase, PhaseParams};
use reqpulse_core::wire::{duration_ms, MetricValue};

use crate::dispatch::PhaseObserver;
use crate::emit::StatsEmitter;

/// Emits the standard per-phase measurements.
///
/// Paired phases become duration metrics in integer milliseconds; single-shot
/// phases become counts, except chunk delivery which reports the chunk's byte
/// length. Metric names are `<transport>_<phase suffix>`, tagged with
/// `domain` whenever a host or URL is available and with `exception_class`
/// for failures.
pub struct StatsObserver {
    emitter: StatsEmitter,
    transport: String,
}

impl StatsObserver {
    pub fn new(emitter: StatsEmitter, transport: impl Into<String>) -> Self {
        Self {
            emitter,
            transport: transport.into(),
        }
    }

    fn metric_name(&self, suffix: &str) -> String {
        format!("{}_{}", self.transport, suffix)
    }
}

#[async_trait]
impl PhaseObserver for StatsObserver {
    async fn on_phase(
        &self,
        ctx: &mut RequestTraceContext,
        phase: Phase,
        params: &PhaseParams,
    ) -> Result<()> {
        // Start phases only drop a mark; the paired end phase reads it back.
        let Some(suffix) = phase.metric_suffix() else {
            ctx.mark_start(phase);
            return Ok(());
        };

        let value = match phase.paired_start() {
            Some(start) => MetricValue::Int(duration_ms(ctx.elapsed_since(start)?)),
            None => match params {
                PhaseParams::Chunk { chunk, .. } => MetricValue::Int(chunk.len() as i64),
                _ => MetricValue::Int(1),
            },
        };

        let mut tags: Vec<(&str, MetricValue)> = Vec::with_capacity(2);
        if let Some(domain) = params.domain() {
            tags.push(("domain", MetricValue::Text(domain.to_string())));
        }
        if let PhaseParams::Exception { kind, .. } = params {
            tags.push(("exception_class", MetricValue::Text(kind.clone())));
        }

        self.emitter
            .send(&self.metric_name(suffix), value, &tags)
            .await;
        Ok(())
    }
}
