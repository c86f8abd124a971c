//! Address bar normalization
//!
//! Turns whatever the user typed into something fetchable:
//! 1. Missing scheme → `https://`
//! 2. Bare host (no path, query or fragment) → `/index.html` appended

use url::Url;

const HTTP: &str = "http://";
const HTTPS: &str = "https://";
const INDEX: &str = "index.html";

/// Canonicalize a user-typed address into a fetchable URL.
///
/// Never fails: any string maps to some URL. Applying it twice gives the
/// same result as applying it once.
pub fn normalize(raw: &str) -> String {
    let raw = raw.trim();

    let mut url = if raw.starts_with(HTTP) || raw.starts_with(HTTPS) {
        raw.to_string()
    } else {
        format!("{}{}", HTTPS, raw)
    };

    if is_bare_host(&url) {
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(INDEX);
    }

    url
}

/// Compact form of a URL for the address bar. Never fed back into
/// [`normalize`].
pub fn simplify(url: &str) -> String {
    let mut out = url;

    out = out.strip_prefix(HTTP).unwrap_or(out);
    out = out.strip_prefix(HTTPS).unwrap_or(out);

    let before_index = out.len();
    if let Some(stripped) = out.strip_suffix("index.html/") {
        out = stripped;
    }
    if let Some(stripped) = out.strip_suffix(INDEX) {
        out = stripped;
    }
    if out.len() != before_index {
        out = out.strip_suffix('/').unwrap_or(out);
    }

    out = out.strip_suffix(".html").unwrap_or(out);

    out.to_string()
}

/// Scheme + host, optionally one trailing slash, nothing after it.
fn is_bare_host(url: &str) -> bool {
    let rest = url
        .strip_prefix(HTTPS)
        .or_else(|| url.strip_prefix(HTTP))
        .unwrap_or(url);

    let only_trailing_slash = match rest.find('/') {
        Some(idx) => idx + 1 == rest.len(),
        None => true,
    };
    if !only_trailing_slash {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            parsed.host_str().is_some_and(|h| !h.is_empty())
                && parsed.path() == "/"
                && parsed.query().is_none()
                && parsed.fragment().is_none()
        }
        Err(_) => false,
    }
}
