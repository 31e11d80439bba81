//! Markdown-to-HTML conversion.
//!
//! Thin wrapper over `pulldown-cmark`. The rest of the crate never touches
//! the parser directly, so swapping the markup dialect stays local to this
//! module.

use pulldown_cmark::{Options, Parser, html};
use regex::Regex;
use std::sync::LazyLock;

/// Paragraph and line-break markers emitted around inline fragments
static PARA_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?(p|br)[^>]*>").unwrap());

/// Convert a raw Markdown body to an HTML string.
pub fn convert(raw: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(raw, options);

    let mut out = String::with_capacity(raw.len() * 2);
    html::push_html(&mut out, parser);
    out
}

/// Render a one-line metadata value (title, summary) as inline HTML.
///
/// The value goes through the full Markdown converter so emphasis and the
/// like survive, then the wrapping paragraph markers are stripped so the
/// result can sit inside a heading or attribute.
pub fn render_inline(text: &str) -> String {
    let rendered = convert(text);
    PARA_TAG.replace_all(&rendered, "").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_paragraph() {
        let html = convert("plain text");
        assert_eq!(html.trim(), "<p>plain text</p>");
    }

    #[test]
    fn test_convert_emphasis() {
        let html = convert("some *emphasis* here");
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_render_inline_strips_paragraph() {
        assert_eq!(render_inline("A *fancy* title"), "A <em>fancy</em> title");
    }

    #[test]
    fn test_render_inline_plain() {
        assert_eq!(render_inline("Just a title"), "Just a title");
    }

    #[test]
    fn test_render_inline_empty() {
        assert_eq!(render_inline(""), "");
    }
}
