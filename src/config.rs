//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment
//! variables (or a `.env` file via `dotenvy`), with sensible defaults
//! so the mock service runs with no configuration at all.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8002`).
    pub listen_addr: SocketAddr,

    /// Directory the image artifacts are resolved against.
    pub asset_dir: PathBuf,

    /// Wait between the timed stages of a `pick_and_place` execution.
    pub stage_delay: Duration,

    /// Advertised locator of the live stream endpoint, placed in chat
    /// replies that reference the stream.
    pub stream_url: String,

    /// Per-subscriber frame buffer capacity.
    pub frame_buffer: usize,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed
    /// as a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8002".to_string())
            .parse()?;

        let asset_dir =
            PathBuf::from(std::env::var("ASSET_DIR").unwrap_or_else(|_| "assets".to_string()));

        let stage_delay = Duration::from_millis(parse_env("STAGE_DELAY_MS", 5000));

        let stream_url = std::env::var("STREAM_URL")
            .unwrap_or_else(|_| "ws://localhost:8002/ws/robot-stream".to_string());

        let frame_buffer = parse_env("FRAME_BUFFER", 32);

        Ok(Self {
            listen_addr,
            asset_dir,
            stage_delay,
            stream_url,
            frame_buffer,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on
/// missing or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing() {
        assert_eq!(parse_env("CLARA_GATEWAY_UNSET_TEST_KEY", 42u64), 42);
    }
}
