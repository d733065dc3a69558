//! Simulated upstream latency.
//!
//! Each endpoint sleeps for its configured duration before generating a
//! response. The sleep only suspends the current request's task; other
//! requests keep running.

use std::time::Duration;

use ragux_core::LatencyConfig;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Search,
    Followup,
    Answer,
}

#[derive(Debug, Clone, Copy)]
pub struct DelaySimulator {
    latency: LatencyConfig,
}

impl DelaySimulator {
    pub fn new(latency: LatencyConfig) -> Self {
        Self { latency }
    }

    pub fn duration(&self, endpoint: Endpoint) -> Duration {
        match endpoint {
            Endpoint::Search => self.latency.search(),
            Endpoint::Followup => self.latency.followup(),
            Endpoint::Answer => self.latency.answer(),
        }
    }

    pub async fn pause(&self, endpoint: Endpoint) {
        let duration = self.duration(endpoint);
        if duration.is_zero() {
            return;
        }
        trace!(?endpoint, ?duration, "Simulating upstream latency");
        tokio::time::sleep(duration).await;
    }
}
