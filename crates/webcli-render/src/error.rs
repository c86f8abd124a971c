//! Render error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("No header font available")]
    Unavailable,

    #[error("Rendered header is {width} columns wide, limit is {limit}")]
    TooWide { width: usize, limit: usize },

    #[error("Font error: {0}")]
    Font(String),
}
