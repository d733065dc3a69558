//! Ragux Core: configuration and shared error types.

pub mod config;
pub mod error;

pub use config::{LatencyConfig, RaguxConfig};
pub use error::{Error, Result};
