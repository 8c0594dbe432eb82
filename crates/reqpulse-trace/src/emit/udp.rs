//! UDP datagram sink.
//!
//! One line per datagram, aimed at a Telegraf-style `socket_listener`. No
//! retry, no buffering, no delivery confirmation.

use async_trait::async_trait;
use tokio::net::UdpSocket;

use reqpulse_core::error::{ReqPulseError, Result};

use super::StatsSink;

/// A connectionless socket bound once at startup and connected to the
/// collector endpoint, then shared read-only for the life of the process.
pub struct UdpSink {
    socket: UdpSocket,
}

impl UdpSink {
    /// Bind a local ephemeral port and connect it to `endpoint`
    /// (`"host:port"`).
    pub async fn bind(endpoint: &str) -> Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| ReqPulseError::Transport(format!("bind failed: {e}")))?;
        socket
            .connect(endpoint)
            .await
            .map_err(|e| ReqPulseError::Transport(format!("connect {endpoint} failed: {e}")))?;
        Ok(Self { socket })
    }
}

#[async_trait]
impl StatsSink for UdpSink {
    async fn send_line(&self, line: &str) -> Result<()> {
        self.socket
            .send(line.as_bytes())
            .await
            .map(|_| ())
            .map_err(|e| ReqPulseError::Transport(e.to_string()))
    }
}
