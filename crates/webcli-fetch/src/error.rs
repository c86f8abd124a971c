//! Fetch error types

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{message}")]
    Status { code: u16, message: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Network error: {0}")]
    Transport(String),
}

impl FetchError {
    /// HTTP status of the failure, `0` when the server never answered with one.
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::Status { code, .. } => *code,
            _ => 0,
        }
    }
}
