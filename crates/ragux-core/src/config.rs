//! Configuration loaded from the environment.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_SEARCH_DELAY_MS: u64 = 800;
pub const DEFAULT_FOLLOWUP_DELAY_MS: u64 = 1000;
pub const DEFAULT_ANSWER_DELAY_MS: u64 = 300;

/// Simulated upstream latency per endpoint, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub search_ms: u64,
    pub followup_ms: u64,
    pub answer_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            search_ms: DEFAULT_SEARCH_DELAY_MS,
            followup_ms: DEFAULT_FOLLOWUP_DELAY_MS,
            answer_ms: DEFAULT_ANSWER_DELAY_MS,
        }
    }
}

impl LatencyConfig {
    /// No simulated latency at all.
    pub fn none() -> Self {
        Self {
            search_ms: 0,
            followup_ms: 0,
            answer_ms: 0,
        }
    }

    pub fn search(&self) -> Duration {
        Duration::from_millis(self.search_ms)
    }

    pub fn followup(&self) -> Duration {
        Duration::from_millis(self.followup_ms)
    }

    pub fn answer(&self) -> Duration {
        Duration::from_millis(self.answer_ms)
    }
}

/// Top-level Ragux configuration.
#[derive(Debug, Clone)]
pub struct RaguxConfig {
    /// Bind address.
    pub host: String,
    /// HTTP server port.
    pub port: u16,
    /// Optional JSON corpus replacing the compiled-in one.
    pub corpus_path: Option<PathBuf>,
    pub latency: LatencyConfig,
}

impl Default for RaguxConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            corpus_path: None,
            latency: LatencyConfig::default(),
        }
    }
}

impl RaguxConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = LatencyConfig::default();

        let host = lookup("HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.into());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let corpus_path = lookup("RAGUX_CORPUS")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let latency = LatencyConfig {
            search_ms: parse_or(&lookup, "RAGUX_SEARCH_DELAY_MS", defaults.search_ms),
            followup_ms: parse_or(&lookup, "RAGUX_FOLLOWUP_DELAY_MS", defaults.followup_ms),
            answer_ms: parse_or(&lookup, "RAGUX_ANSWER_DELAY_MS", defaults.answer_ms),
        };

        Self {
            host,
            port,
            corpus_path,
            latency,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}
