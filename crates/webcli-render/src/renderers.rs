//! Per-tag line renderers
//!
//! Each renderer looks at one element only: its tag, own text and attributes.
//! Children are visited separately by the engine, so nothing here recurses.

use unicode_width::UnicodeWidthStr;

use crate::dispatch::RendererKind;
use crate::element::Element;
use crate::font::HeaderFont;
use crate::DISPLAY_WIDTH;

impl RendererKind {
    /// Lines for a single element, in display order.
    pub fn render<E: Element>(self, element: &E, font: &dyn HeaderFont) -> Vec<String> {
        let text = element.own_text();

        match self {
            RendererKind::Header => header(element.tag_name(), &text, font),
            RendererKind::Text => text_box(&text),
            RendererKind::Image => vec![format!(
                "[IMAGE alt=\"{}\"]",
                element.attr("alt").unwrap_or_default()
            )],
            RendererKind::Break => vec![" ".repeat(DISPLAY_WIDTH)],
            RendererKind::Link => vec![format!(
                "[LINK text=\"{}\" link=\"{}\"]",
                text,
                element.attr("href").unwrap_or_default()
            )],
            RendererKind::Line => vec!["_".repeat(DISPLAY_WIDTH)],
            RendererKind::Button => vec![button(element)],
            RendererKind::ListItem => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![format!("•{}", text)]
                }
            }
            RendererKind::Script => {
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![text.chars().map(superscript).collect()]
                }
            }
            RendererKind::Unimplemented => unimplemented_block(element.tag_name(), &text),
        }
    }
}

fn header(tag: &str, text: &str, font: &dyn HeaderFont) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let art = font.render(text).and_then(|rows| {
        let width = rows.iter().map(|r| r.width()).max().unwrap_or(0);
        if width > DISPLAY_WIDTH {
            Err(crate::FontError::TooWide {
                width,
                limit: DISPLAY_WIDTH,
            })
        } else {
            Ok(rows)
        }
    });

    match art {
        Ok(rows) if !rows.is_empty() => rows,
        Ok(_) => bracketed_heading(tag, text),
        Err(e) => {
            tracing::debug!(tag, error = %e, "Header font unavailable, using fallback");
            bracketed_heading(tag, text)
        }
    }
}

fn bracketed_heading(tag: &str, text: &str) -> Vec<String> {
    let ends = match tag.to_ascii_lowercase().as_str() {
        "h1" | "header" => "======",
        "h2" => "=====",
        "h3" => "====",
        "h4" => "===",
        "h5" => "==",
        _ => "=",
    };

    vec![String::new(), format!("{ends}{text}{ends}")]
}

fn text_box(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let border = format!("+{}+", "-".repeat(DISPLAY_WIDTH - 2));
    // "| " on the left, "|" on the right
    let capacity = DISPLAY_WIDTH - 3;

    let mut lines = vec![border.clone()];
    lines.extend(wrap_words(text, capacity).iter().map(|row| boxed_row(row)));
    lines.push(border);
    lines.push(String::new());
    lines
}

/// Greedy word wrap. Words are never split; a word wider than `capacity`
/// gets a row to itself.
fn wrap_words(text: &str, capacity: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();

    for word in text.split_whitespace() {
        if row.is_empty() {
            row.push_str(word);
        } else if row.width() + 1 + word.width() <= capacity {
            row.push(' ');
            row.push_str(word);
        } else {
            rows.push(std::mem::take(&mut row));
            row.push_str(word);
        }
    }

    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

fn boxed_row(row: &str) -> String {
    let mut line = format!("| {row}");
    let width = line.width();
    if width < DISPLAY_WIDTH - 1 {
        line.push_str(&" ".repeat(DISPLAY_WIDTH - 1 - width));
    }
    line.push('|');
    line
}

// The `text` attribute used to be printed twice, once as `value=` and once
// as `text=`; only the `text=` copy is kept.
fn button<E: Element>(element: &E) -> String {
    let parts: Vec<String> = ["name", "type", "text"]
        .iter()
        .filter_map(|name| {
            element
                .attr(name)
                .filter(|v| !v.is_empty())
                .map(|v| format!("{name}=\"{v}\""))
        })
        .collect();

    if parts.is_empty() {
        "[BUTTON]".to_string()
    } else {
        format!("[BUTTON {}]", parts.join(" "))
    }
}

fn unimplemented_block(tag: &str, text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let header = format!("+-----(UNIMPLEMENTED ELEMENT \"{tag}\")-----+");
    let footer = format!("+{}+", "-".repeat(header.chars().count() - 2));

    vec![header, text.to_string(), footer]
}

fn superscript(c: char) -> char {
    match c {
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'f' => 'ᶠ',
        'g' => 'ᵍ',
        'h' => 'ʰ',
        'i' => 'ⁱ',
        'j' => 'ʲ',
        'k' => 'ᵏ',
        'l' => 'ˡ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'o' => 'ᵒ',
        'p' => 'ᵖ',
        'q' => 'ᑫ',
        'r' => 'ʳ',
        's' => 'ˢ',
        't' => 'ᵗ',
        'u' => 'ᵘ',
        'v' => 'ᵛ',
        'w' => 'ʷ',
        'x' => 'ˣ',
        'y' => 'ʸ',
        'z' => 'ᶻ',
        other => other,
    }
}
