//! reqpulse demo wiring.
//!
//! - init tracing subscriber
//! - load `reqpulse.yaml` (defaults when the file is absent)
//! - bind the UDP sink and build the standard dispatcher
//! - drive two concurrent simulated request lifecycles plus one profiled unit
//!
//! Point `stats.host`/`stats.port` at a Telegraf `socket_listener` to watch
//! the lines arrive. The real fetch loop belongs to the embedding client.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::sleep;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use reqpulse_core::error::{ReqPulseError, Result};
use reqpulse_trace::config::{self, TraceConfig};
use reqpulse_trace::dispatch::{self, TraceDispatcher};
use reqpulse_trace::emit::{StatsEmitter, UdpSink};
use reqpulse_trace::profile::profile;
use reqpulse_trace::session::RequestTrace;

const CONFIG_PATH: &str = "reqpulse.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = if Path::new(CONFIG_PATH).exists() {
        config::load_from_file(CONFIG_PATH)?
    } else {
        TraceConfig::default()
    };

    let sink = Arc::new(UdpSink::bind(&cfg.stats.endpoint()).await?);
    let emitter = StatsEmitter::new(sink);
    let dispatcher = dispatch::standard_dispatcher(emitter.clone(), cfg.stats.transport.clone());

    tracing::info!(endpoint = %cfg.stats.endpoint(), transport = %cfg.stats.transport, "reqpulse demo starting");

    let (py, moz) = profile(&emitter, "demo_fetch", async {
        tokio::join!(
            simulate_request(Arc::clone(&dispatcher), "https://www.python.org/"),
            simulate_request(Arc::clone(&dispatcher), "https://www.mozilla.org/en-US/"),
        )
    })
    .await;
    py?;
    moz?;

    tracing::info!("reqpulse demo done");
    Ok(())
}

/// Drive one request lifecycle against the dispatcher with synthetic
/// latencies standing in for the real transport.
async fn simulate_request(dispatcher: Arc<TraceDispatcher>, url: &str) -> Result<()> {
    let url = Url::parse(url).map_err(|e| ReqPulseError::Internal(format!("bad demo url: {e}")))?;
    let host = url.host_str().unwrap_or("unknown").to_string();

    let mut trace = RequestTrace::new(dispatcher);
    trace.on_request_start().await;

    trace.on_dns_resolvehost_start(&host).await;
    sleep(Duration::from_millis(3)).await;
    trace.on_dns_resolvehost_end(&host).await;
    trace.on_dns_cache_miss(&host).await;

    trace.on_connection_create_start().await;
    sleep(Duration::from_millis(5)).await;
    trace.on_connection_create_end().await;

    // Pretend exchange.
    sleep(Duration::from_millis(20)).await;
    trace
        .on_response_chunk_received(&url, Bytes::from_static(b"<!doctype html>"))
        .await;

    trace.on_request_end(&url).await;
    Ok(())
}
