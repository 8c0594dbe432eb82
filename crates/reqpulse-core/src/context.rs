//! Per-request phase timer storage.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::{ReqPulseError, Result};
use crate::phase::Phase;

/// Scratch storage for in-flight phase start marks, owned by exactly one
/// request.
///
/// Created when the request starts and dropped with it, on success, error,
/// or cancellation alike. Marks that never get read simply die with the
/// context. No timer state is ever shared between concurrent requests, so
/// no locking is needed.
#[derive(Debug, Default)]
pub struct RequestTraceContext {
    marks: HashMap<Phase, Instant>,
}

impl RequestTraceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current monotonic time under `phase`.
    pub fn mark_start(&mut self, phase: Phase) {
        if self.marks.insert(phase, Instant::now()).is_some() {
            tracing::debug!(%phase, "start mark overwritten before being read");
        }
    }

    /// Elapsed time since `mark_start(phase)`, consuming the mark.
    ///
    /// Consume-on-read keeps an end hook from silently reusing a stale
    /// start: an end that fires twice, or without its start, surfaces as
    /// [`ReqPulseError::TimerPairing`] instead of a garbage duration.
    pub fn elapsed_since(&mut self, phase: Phase) -> Result<Duration> {
        let start = self
            .marks
            .remove(&phase)
            .ok_or(ReqPulseError::TimerPairing(phase))?;
        Ok(start.elapsed())
    }

    /// Number of unread start marks.
    pub fn pending(&self) -> usize {
        self.marks.len()
    }
}
