//! Error types for solar estimation

use thiserror::Error;

/// Failure reported by a rasterizer backend.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RenderError(pub String);

impl RenderError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("render unavailable: {0}")]
    RenderUnavailable(#[from] RenderError),

    #[error("no building or sun direction selected")]
    NoSelection,

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
