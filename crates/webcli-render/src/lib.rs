//! WebCLI Render
//!
//! Converts a parsed HTML document into a flat list of terminal lines:
//! - Every element is visited in document order
//! - Each tag maps to one line renderer through a fixed dispatch table
//! - Unknown tags fall back to a visible "unimplemented" block
//!
//! Also holds the error page templates shown when a fetch fails.

mod dispatch;
mod element;
mod engine;
mod error;
mod error_page;
mod font;
mod renderers;

pub use dispatch::{DispatchTable, RendererKind};
pub use element::{Element, HtmlDocument};
pub use engine::{RenderEngine, RenderedPage};
pub use error::FontError;
pub use error_page::{error_page, error_page_lines};
pub use font::{HeaderFont, NoFont};

/// Column width shared by every box, rule and break renderer.
pub const DISPLAY_WIDTH: usize = 60;
