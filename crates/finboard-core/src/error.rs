//! Error types for finboard

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("Backend rejected credentials")]
    Unauthorized,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether the error means the transaction source could not be reached or
    /// answered with a failure (as opposed to bad input on our side)
    pub fn is_source_unavailable(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Backend { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
