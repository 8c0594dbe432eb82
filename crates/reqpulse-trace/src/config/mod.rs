//! Trace config loader (strict parsing).

pub mod schema;

use std::fs;

use reqpulse_core::error::{ReqPulseError, Result};

pub use schema::{StatsConfig, TraceConfig};

pub fn load_from_file(path: &str) -> Result<TraceConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ReqPulseError::Config(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<TraceConfig> {
    let cfg: TraceConfig = serde_yaml::from_str(s)
        .map_err(|e| ReqPulseError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
