//! Server configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_HOST: &str = "livetiming.ficr.it";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,

    /// Only this host and its subdomains may be proxied
    pub upstream_host: String,

    pub upstream_timeout: Duration,

    /// Access code that routes proxy requests to the simulator
    pub demo_code: String,

    /// Access code that routes proxy requests to the snapshot player
    pub snapshot_code: String,

    /// JSON roster file; the built-in roster is used when unset
    pub roster_path: Option<PathBuf>,

    /// JSON recording; the built-in capture is used when unset
    pub snapshot_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upstream_host: DEFAULT_UPSTREAM_HOST.to_string(),
            upstream_timeout: Duration::from_secs(10),
            demo_code: "DEMO".to_string(),
            snapshot_code: "SNAPSHOT".to_string(),
            roster_path: None,
            snapshot_path: None,
        }
    }
}

impl ServerConfig {
    /// Read `PORT` and the `LTR_*` variables, keeping defaults for unset or
    /// invalid values
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = parse_or(text("PORT"), "PORT", defaults.port);
        let timeout_secs = parse_or(
            text("LTR_UPSTREAM_TIMEOUT_SECS"),
            "LTR_UPSTREAM_TIMEOUT_SECS",
            defaults.upstream_timeout.as_secs(),
        );

        Self {
            port,
            upstream_host: text("LTR_UPSTREAM_HOST").unwrap_or(defaults.upstream_host),
            upstream_timeout: Duration::from_secs(timeout_secs),
            demo_code: text("LTR_DEMO_CODE").unwrap_or(defaults.demo_code),
            snapshot_code: text("LTR_SNAPSHOT_CODE").unwrap_or(defaults.snapshot_code),
            roster_path: text("LTR_ROSTER").map(PathBuf::from),
            snapshot_path: text("LTR_SNAPSHOT").map(PathBuf::from),
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
