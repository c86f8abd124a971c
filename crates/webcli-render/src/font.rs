//! Big ASCII-art heading fonts

use crate::error::FontError;

/// Renders heading text as multi-row ASCII art.
///
/// Any error makes the header renderer fall back to a bracketed heading.
pub trait HeaderFont: Send + Sync {
    fn render(&self, text: &str) -> Result<Vec<String>, FontError>;
}

/// No font installed; every heading uses the bracketed fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFont;

impl HeaderFont for NoFont {
    fn render(&self, _text: &str) -> Result<Vec<String>, FontError> {
        Err(FontError::Unavailable)
    }
}
