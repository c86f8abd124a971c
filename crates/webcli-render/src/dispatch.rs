//! Tag → renderer lookup
//!
//! A fixed, ordered table of tag sets. Lookup scans it in order and the first
//! set containing the tag wins; nothing matching falls back to
//! [`RendererKind::Unimplemented`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RendererKind {
    Header,
    /// Word-wrapped paragraph box
    Text,
    Image,
    Break,
    Link,
    Line,
    Button,
    ListItem,
    /// Superscript letters, only present in [`DispatchTable::with_scripts`]
    Script,
    Unimplemented,
}

const HEADER_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "header"];
// Lists share the paragraph box rather than getting their own renderer.
const TEXT_TAGS: &[&str] = &["p", "span", "div", "textarea", "menu", "ul", "ol"];
const IMAGE_TAGS: &[&str] = &["img"];
const BREAK_TAGS: &[&str] = &["br"];
const LINK_TAGS: &[&str] = &["a"];
const LINE_TAGS: &[&str] = &["hr"];
const BUTTON_TAGS: &[&str] = &["button"];
const LIST_ITEM_TAGS: &[&str] = &["li"];
const SCRIPT_TAGS: &[&str] = &["sup", "sub"];

#[derive(Debug, Clone)]
pub struct DispatchTable {
    entries: Vec<(&'static [&'static str], RendererKind)>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self {
            entries: vec![
                (HEADER_TAGS, RendererKind::Header),
                (TEXT_TAGS, RendererKind::Text),
                (IMAGE_TAGS, RendererKind::Image),
                (BREAK_TAGS, RendererKind::Break),
                (LINK_TAGS, RendererKind::Link),
                (LINE_TAGS, RendererKind::Line),
                (BUTTON_TAGS, RendererKind::Button),
                (LIST_ITEM_TAGS, RendererKind::ListItem),
            ],
        }
    }

    /// Default table plus `sup`/`sub` superscript rendering.
    pub fn with_scripts() -> Self {
        let mut table = Self::new();
        table.entries.push((SCRIPT_TAGS, RendererKind::Script));
        table
    }

    /// Renderer for `tag`, compared case-insensitively.
    pub fn resolve(&self, tag: &str) -> RendererKind {
        let tag = tag.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(tags, _)| tags.contains(&tag.as_str()))
            .map(|(_, kind)| *kind)
            .unwrap_or(RendererKind::Unimplemented)
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_tags() {
        let table = DispatchTable::new();

        assert_eq!(table.resolve("h3"), RendererKind::Header);
        assert_eq!(table.resolve("header"), RendererKind::Header);
        assert_eq!(table.resolve("div"), RendererKind::Text);
        assert_eq!(table.resolve("ul"), RendererKind::Text);
        assert_eq!(table.resolve("ol"), RendererKind::Text);
        assert_eq!(table.resolve("img"), RendererKind::Image);
        assert_eq!(table.resolve("br"), RendererKind::Break);
        assert_eq!(table.resolve("a"), RendererKind::Link);
        assert_eq!(table.resolve("hr"), RendererKind::Line);
        assert_eq!(table.resolve("button"), RendererKind::Button);
        assert_eq!(table.resolve("li"), RendererKind::ListItem);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let table = DispatchTable::new();
        assert_eq!(table.resolve("H1"), RendererKind::Header);
        assert_eq!(table.resolve("SpAn"), RendererKind::Text);
    }

    #[test]
    fn test_fallback() {
        let table = DispatchTable::new();
        assert_eq!(table.resolve("custom-widget"), RendererKind::Unimplemented);
        assert_eq!(table.resolve("body"), RendererKind::Unimplemented);
        assert_eq!(table.resolve(""), RendererKind::Unimplemented);
    }

    #[test]
    fn test_scripts_opt_in() {
        assert_eq!(DispatchTable::new().resolve("sup"), RendererKind::Unimplemented);
        assert_eq!(DispatchTable::with_scripts().resolve("sup"), RendererKind::Script);
        assert_eq!(DispatchTable::with_scripts().resolve("SUB"), RendererKind::Script);
    }
}
