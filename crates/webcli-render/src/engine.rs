//! Document → display lines

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::dispatch::DispatchTable;
use crate::element::{Element, HtmlDocument};
use crate::font::{HeaderFont, NoFont};

/// What the display surface shows for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedPage {
    pub title: String,
    pub lines: Vec<String>,
    /// Address bar text, `None` to leave the bar as it is
    pub address: Option<String>,
}

#[derive(Clone)]
pub struct RenderEngine {
    table: DispatchTable,
    font: Arc<dyn HeaderFont>,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::with_table(DispatchTable::new())
    }

    pub fn with_table(table: DispatchTable) -> Self {
        Self {
            table,
            font: Arc::new(NoFont),
        }
    }

    pub fn set_font(&mut self, font: Arc<dyn HeaderFont>) {
        self.font = font;
    }

    /// Render `root` and everything below it into one linear buffer.
    pub fn render<E: Element>(&self, root: &E) -> Vec<String> {
        let mut lines = Vec::new();
        let mut elements = 0usize;

        for element in root.descendants() {
            let kind = self.table.resolve(element.tag_name());
            lines.extend(kind.render(&element, self.font.as_ref()));
            elements += 1;
        }

        tracing::debug!(elements, lines = lines.len(), "Rendered element tree");

        lines
    }

    /// Render a parsed document's body. The title is empty when the document
    /// has none.
    pub fn render_document(&self, document: &HtmlDocument) -> RenderedPage {
        RenderedPage {
            title: document.title().unwrap_or_default(),
            lines: self.render(&document.content_root()),
            address: None,
        }
    }
}

impl Default for RenderEngine {
    fn default() -> Self {
        Self::new()
    }
}
