//! reqpulse trace runtime.
//!
//! Wires the UDP stats sink, the lifecycle hook dispatcher, and the
//! profiling wrappers into a client-side telemetry stack. Consumed by the
//! demo binary (`main.rs`), by HTTP client integrations, and by the
//! integration tests.

pub mod config;
pub mod dispatch;
pub mod emit;
pub mod profile;
pub mod session;
