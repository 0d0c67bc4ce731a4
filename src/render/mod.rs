//! Server-side HTML rendering.
//!
//! Pages are plain `String`s assembled from the components in
//! [`templates`]. Every value that came from the store passes through
//! [`escape_html`] before it reaches the page.

pub mod pages;
pub mod templates;

/// HTML escape a string.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
