//! Error types for Ragux.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Generator error: {0}")]
    Generator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
