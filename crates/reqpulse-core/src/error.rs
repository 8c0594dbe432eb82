//! Shared error type across reqpulse crates.

use thiserror::Error;

use crate::phase::Phase;

/// Shared result type.
pub type Result<T> = std::result::Result<T, ReqPulseError>;

/// Unified error type used by core and the trace runtime.
#[derive(Debug, Error)]
pub enum ReqPulseError {
    /// Config rejected at load or validation time.
    #[error("bad config: {0}")]
    Config(String),
    /// An end hook fired without its start hook in the same request context.
    /// This is a hook-wiring defect, not a runtime condition.
    #[error("no start mark for phase {0}")]
    TimerPairing(Phase),
    /// Metrics transport failure. The emitter logs and swallows these;
    /// they never reach the request path.
    #[error("stats transport: {0}")]
    Transport(String),
    #[error("internal: {0}")]
    Internal(String),
}
