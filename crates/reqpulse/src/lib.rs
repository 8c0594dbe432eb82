//! Top-level facade crate for reqpulse.
//!
//! Re-exports core types and the trace runtime so users can depend on a single crate.

pub mod core {
    pub use reqpulse_core::*;
}

pub mod trace {
    pub use reqpulse_trace::*;
}
