//! reqpulse core: lifecycle phases, wire encoding, and per-request timer state.
//!
//! This crate defines the metric wire format, the fixed set of outbound HTTP
//! request lifecycle phases, and the per-request trace context shared by the
//! trace runtime and integration tests. It intentionally carries no socket or
//! runtime dependencies so it can sit next to any HTTP client.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `ReqPulseError`/`Result` so telemetry
//! can never crash the request path it observes.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod context;
pub mod error;
pub mod phase;
pub mod wire;

/// Shared result type.
pub use error::{ReqPulseError, Result};
