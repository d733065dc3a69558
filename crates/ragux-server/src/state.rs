//! Shared application state.

use std::sync::Arc;

use ragux_core::RaguxConfig;
use ragux_protocol::{RequestSchemas, SchemaError};
use ragux_resolve::ResponseGenerator;

use crate::delay::DelaySimulator;

/// Read-only state shared by all route handlers.
pub struct AppState {
    pub config: RaguxConfig,
    pub schemas: RequestSchemas,
    pub generator: Arc<dyn ResponseGenerator>,
    pub delay: DelaySimulator,
}

impl AppState {
    pub fn new(
        config: RaguxConfig,
        generator: Arc<dyn ResponseGenerator>,
    ) -> Result<Self, SchemaError> {
        let delay = DelaySimulator::new(config.latency);
        Ok(Self {
            config,
            schemas: RequestSchemas::new()?,
            generator,
            delay,
        })
    }
}
