//! Element access
//!
//! Renderers only ever see an element through [`Element`]: its tag, its own
//! text, and its attributes. The document tree itself comes from `scraper`.

use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose content is raw data (code, styles, inert markup) rather
/// than page text. Their own text is always empty.
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

pub trait Element: Sized {
    type Descendants: Iterator<Item = Self>;

    fn tag_name(&self) -> &str;

    /// Text directly inside this element, excluding child elements' text.
    /// Whitespace is collapsed and trimmed. Empty for `<script>`, `<style>`,
    /// `<noscript>` and `<template>`.
    fn own_text(&self) -> String;

    fn attr(&self, name: &str) -> Option<&str>;

    /// This element followed by every element below it, depth first, in
    /// document order.
    fn descendants(&self) -> Self::Descendants;
}

impl<'a> Element for ElementRef<'a> {
    type Descendants = Box<dyn Iterator<Item = ElementRef<'a>> + 'a>;

    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn own_text(&self) -> String {
        if RAW_TEXT_TAGS
            .iter()
            .any(|tag| self.value().name().eq_ignore_ascii_case(tag))
        {
            return String::new();
        }

        let raw = self
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(&**text),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(" ");

        normalize_whitespace(&raw)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn descendants(&self) -> Self::Descendants {
        let node = **self;
        Box::new(node.descendants().filter_map(ElementRef::wrap))
    }
}

/// A fetched page parsed into a tree. Parsing is lenient and never fails.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Trimmed `<title>` text, if the document has a non-empty one.
    pub fn title(&self) -> Option<String> {
        let sel = Selector::parse("title").ok()?;
        self.html
            .select(&sel)
            .map(|el| normalize_whitespace(&el.text().collect::<String>()))
            .find(|t| !t.is_empty())
    }

    /// The `<body>` element, or the document root when there is none.
    pub fn content_root(&self) -> ElementRef<'_> {
        Selector::parse("body")
            .ok()
            .and_then(|sel| self.html.select(&sel).next())
            .unwrap_or_else(|| self.html.root_element())
    }
}

fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out.trim().to_string()
}
