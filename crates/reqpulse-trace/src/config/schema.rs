use serde::Deserialize;

use reqpulse_core::error::{ReqPulseError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    pub version: u32,

    #[serde(default)]
    pub stats: StatsConfig,
}

impl TraceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ReqPulseError::Config("version must be 1".into()));
        }
        self.stats.validate()
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            stats: StatsConfig::default(),
        }
    }
}

/// Destination and naming of emitted measurements. Process-wide, set once at
/// startup, immutable thereafter.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Metric-name prefix; every emitted lifecycle metric is named
    /// `<transport>_<phase suffix>`.
    #[serde(default = "default_transport")]
    pub transport: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            transport: default_transport(),
        }
    }
}

impl StatsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(ReqPulseError::Config("stats.host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(ReqPulseError::Config("stats.port must be nonzero".into()));
        }
        if self.transport.is_empty() || self.transport.contains([':', '_', '|']) {
            return Err(ReqPulseError::Config(
                "stats.transport must be nonempty and free of ':', '_', '|'".into(),
            ));
        }
        Ok(())
    }

    /// `host:port` endpoint for the UDP sink.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    8094
}
fn default_transport() -> String {
    "reqpulse".into()
}
