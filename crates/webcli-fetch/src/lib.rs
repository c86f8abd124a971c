//! WebCLI Fetch
//!
//! Retrieves HTML documents for the browser:
//! - Redirect following and a single request timeout
//! - Download progress sent as percentages over a channel
//! - HTTP status failures kept apart from transport failures

mod error;
mod fetcher;

pub use error::FetchError;
pub use fetcher::{FetchRequest, FetchedDocument, HttpFetcher, PageFetcher, ProgressSender};

pub type Result<T> = std::result::Result<T, FetchError>;
