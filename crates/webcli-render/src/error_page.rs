//! Pages shown instead of a document when fetching fails

use crate::engine::RenderedPage;

const GENERIC_TEMPLATE: &str = r"
  _____
 | ____|_ __ _ __ ___  _ __
 |  _| | '__| '__/ _ \| '__|
 | |___| |  | | | (_) | |
 |_____|_|  |_|  \___/|_|

 Unable to reach page
 status: {status}";

const NOT_FOUND_TEMPLATE: &str = r"
  _  _    ___  _  _
 | || |  / _ \| || |
 | || |_| | | | || |_
 |__   _| |_| |__   _|
    |_|  \___/   |_|

 Page not found";

/// Body lines for a failed fetch. `code` is `0` when no HTTP status exists.
pub fn error_page_lines(code: u16, message: Option<&str>) -> Vec<String> {
    let body = if code == 404 {
        NOT_FOUND_TEMPLATE.to_string()
    } else {
        GENERIC_TEMPLATE.replace("{status}", &code.to_string())
    };

    let mut lines: Vec<String> = body.lines().map(str::to_string).collect();

    if let Some(message) = message.map(str::trim).filter(|m| !m.is_empty()) {
        lines.push(String::new());
        lines.push(message.to_string());
    }

    lines
}

pub fn error_page(code: u16, message: Option<&str>) -> RenderedPage {
    RenderedPage {
        title: format!("Error {}", code),
        lines: error_page_lines(code, message),
        address: None,
    }
}
