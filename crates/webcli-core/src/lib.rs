//! WebCLI Core
//!
//! Ties navigation, fetching and rendering into one browsing session.
//! The terminal host only ever sees finished [`RenderedPage`]s.

mod browser;
mod config;
mod error;

pub use browser::{Browser, FetchOutcome};
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use webcli_fetch::{
    FetchError, FetchRequest, FetchedDocument, HttpFetcher, PageFetcher, ProgressSender,
};
pub use webcli_navigation::{normalize, simplify, History, NavigationNode, NodeId};
pub use webcli_render::{
    error_page, DispatchTable, HeaderFont, HtmlDocument, NoFont, RenderEngine, RenderedPage,
    DISPLAY_WIDTH,
};

use std::path::Path;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// With a `log_file` everything goes there instead of stderr, since the
/// terminal host owns the screen.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;

            fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
