use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use reqpulse_core::context::RequestTraceContext;
use reqpulse_core::error::Result;
use reqpulse_core::phase::{Phase, PhaseParams};

/// Observer invoked at a lifecycle point, with exclusive access to the
/// request's own timer context.
#[async_trait]
pub trait PhaseObserver: Send + Sync {
    async fn on_phase(
        &self,
        ctx: &mut RequestTraceContext,
        phase: Phase,
        params: &PhaseParams,
    ) -> Result<()>;
}

/// Registry and dispatcher for lifecycle observers.
///
/// Observers are registered per phase at startup and invoked in registration
/// order. An observer error is logged and does not stop later observers:
/// telemetry must never break the request it observes.
#[derive(Default)]
pub struct TraceDispatcher {
    observers: DashMap<Phase, Vec<Arc<dyn PhaseObserver>>>,
}

impl TraceDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `observer` to the list for `phase`.
    pub fn register(&self, phase: Phase, observer: Arc<dyn PhaseObserver>) {
        self.observers.entry(phase).or_default().push(observer);
    }

    /// Register one observer for every lifecycle phase.
    pub fn register_all(&self, observer: Arc<dyn PhaseObserver>) {
        for phase in Phase::ALL {
            self.register(phase, Arc::clone(&observer));
        }
    }

    /// Phases that currently have at least one observer.
    pub fn observed_phases(&self) -> Vec<Phase> {
        self.observers
            .iter()
            .filter(|e| !e.value().is_empty())
            .map(|e| *e.key())
            .collect()
    }

    /// Invoke the observers registered for `phase`, in order.
    pub async fn dispatch(&self, ctx: &mut RequestTraceContext, phase: Phase, params: &PhaseParams) {
        // Clone the list out before awaiting; holding a map guard across an
        // await point would block registration and other shard access.
        let Some(list) = self.observers.get(&phase).map(|e| e.value().clone()) else {
            return;
        };
        for observer in list {
            if let Err(e) = observer.on_phase(ctx, phase, params).await {
                tracing::error!(%phase, error = %e, "phase observer failed");
            }
        }
    }
}
