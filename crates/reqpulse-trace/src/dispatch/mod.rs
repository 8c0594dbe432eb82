//! Lifecycle hook dispatch.
//!
//! Re-exports the dispatcher, the observer trait, and the built-in stats
//! observer so downstream consumers can depend on this module directly.

pub mod dispatcher;
pub mod stats;

pub use dispatcher::{PhaseObserver, TraceDispatcher};
pub use stats::StatsObserver;

use std::sync::Arc;

use crate::emit::StatsEmitter;

/// Build a dispatcher with the standard stats observer registered for every
/// lifecycle phase.
pub fn standard_dispatcher(
    emitter: StatsEmitter,
    transport: impl Into<String>,
) -> Arc<TraceDispatcher> {
    let dispatcher = TraceDispatcher::new();
    dispatcher.register_all(Arc::new(StatsObserver::new(emitter, transport)));
    Arc::new(dispatcher)
}
