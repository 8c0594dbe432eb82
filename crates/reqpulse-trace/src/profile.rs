//! Wall-clock profiling wrappers.
//!
//! Two explicit entry points instead of runtime introspection: [`profile`]
//! awaits a future, [`profile_blocking`] calls a closure. Both emit a single
//! `<name>_exec_time` measurement covering the entire execution (suspension
//! time included) and hand back the wrapped unit's output unchanged, errors
//! and all.

use std::future::Future;
use std::time::Instant;

use reqpulse_core::wire::{duration_ms, MetricValue};

use crate::emit::StatsEmitter;

const EXEC_TIME_SUFFIX: &str = "_exec_time";

/// Time a suspendable unit of work and emit `<name>_exec_time`.
pub async fn profile<F, T>(emitter: &StatsEmitter, name: &str, work: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let out = work.await;
    emit_exec_time(emitter, name, start).await;
    out
}

/// Time a blocking unit of work and emit `<name>_exec_time`.
///
/// The closure runs on the current thread; wrap long-running work in
/// `spawn_blocking` upstream when calling from a runtime worker.
pub async fn profile_blocking<F, T>(emitter: &StatsEmitter, name: &str, work: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let out = work();
    emit_exec_time(emitter, name, start).await;
    out
}

async fn emit_exec_time(emitter: &StatsEmitter, name: &str, start: Instant) {
    let metric = format!("{name}{EXEC_TIME_SUFFIX}");
    emitter
        .send(&metric, MetricValue::Int(duration_ms(start.elapsed())), &[])
        .await;
}
