//! Markdown to HTML via regex substitution.
//!
//! Deliberately not a real markdown pipeline: a handful of substitutions
//! covering headings, emphasis, inline code, links and flat unordered
//! lists. Nesting, block quotes and fenced code are out of scope.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#{1,6})\s+(.+)$").unwrap());
static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());
static CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[-*]\s+(.+)$").unwrap());

/// Render a markdown fragment to HTML.
pub fn to_html(markdown: &str) -> String {
    let escaped = markdown
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");

    let mut html = HEADING
        .replace_all(&escaped, |caps: &regex::Captures| {
            let level = caps[1].len();
            format!("<h{level}>{}</h{level}>", &caps[2])
        })
        .into_owned();

    html = BOLD.replace_all(&html, "<strong>$1</strong>").into_owned();
    html = ITALIC.replace_all(&html, "<em>$1</em>").into_owned();
    html = CODE.replace_all(&html, "<code>$1</code>").into_owned();
    html = LINK
        .replace_all(&html, "<a href=\"$2\">$1</a>")
        .into_owned();
    html = LIST_ITEM.replace_all(&html, "<li>$1</li>").into_owned();

    // Paragraphs: blocks separated by blank lines, skipping blocks that
    // already start with a block-level tag.
    html.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .map(|block| {
            let trimmed = block.trim();
            if trimmed.starts_with("<h") {
                trimmed.to_string()
            } else if trimmed.starts_with("<li>") {
                format!("<ul>{}</ul>", trimmed.replace('\n', ""))
            } else {
                format!("<p>{}</p>", trimmed.replace('\n', " "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings() {
        assert_eq!(to_html("# Title"), "<h1>Title</h1>");
        assert_eq!(to_html("### Sub"), "<h3>Sub</h3>");
    }

    #[test]
    fn inline_styles_and_links() {
        assert_eq!(
            to_html("Some **bold** and *italic* and `code`."),
            "<p>Some <strong>bold</strong> and <em>italic</em> and <code>code</code>.</p>"
        );
        assert_eq!(
            to_html("See [the docs](https://example.com)."),
            "<p>See <a href=\"https://example.com\">the docs</a>.</p>"
        );
    }

    #[test]
    fn lists_are_wrapped() {
        assert_eq!(
            to_html("- one\n- two"),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn paragraphs_and_escaping() {
        assert_eq!(
            to_html("first\n\nsecond"),
            "<p>first</p>\n<p>second</p>"
        );
        assert_eq!(to_html("a < b & c"), "<p>a &lt; b &amp; c</p>");
    }
}
