//! Coarse on-page analysis for the SEO tool.
//!
//! Produces the shallow [`PageAnalysis`] object shipped to the completion
//! endpoint alongside the URL and target keyword. Tag handling is regex
//! level on purpose; anything smarter belongs to the model.

use once_cell::sync::Lazy;
use regex::Regex;

use folio_functions::PageAnalysis;

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").unwrap());
static META_DESCRIPTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<meta[^>]+name\s*=\s*["']description["'][^>]*content\s*=\s*["']([^"']*)["']"#)
        .unwrap()
});
static H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<h1[\s>]").unwrap());
static IMG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)<img[^>]*>").unwrap());
static ALT_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)\balt\s*=\s*["'][^"']+["']"#).unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]+>").unwrap());

/// Analyze an HTML document against a target keyword.
pub fn analyze_page(html: &str, keyword: &str) -> PageAnalysis {
    let text = TAG.replace_all(html, " ");
    let text_lower = text.to_lowercase();
    let keyword_lower = keyword.trim().to_lowercase();

    let keyword_occurrences = if keyword_lower.is_empty() {
        0
    } else {
        text_lower.matches(&keyword_lower).count() as u32
    };

    PageAnalysis {
        word_count: text.split_whitespace().count() as u32,
        title: TITLE
            .captures(html)
            .map(|caps| caps[1].trim().to_string())
            .filter(|t| !t.is_empty()),
        meta_description: META_DESCRIPTION
            .captures(html)
            .map(|caps| caps[1].trim().to_string())
            .filter(|d| !d.is_empty()),
        h1_count: H1.find_iter(html).count() as u32,
        images_missing_alt: IMG
            .find_iter(html)
            .filter(|m| !ALT_ATTR.is_match(m.as_str()))
            .count() as u32,
        keyword_occurrences,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>Rust Portfolio - Home</title>
            <meta name="description" content="A portfolio built in public.">
          </head>
          <body>
            <h1>Hi, I build things in Rust</h1>
            <img src="a.png" alt="workbench">
            <img src="b.png">
            <p>Rust portfolio projects, rust portfolio notes.</p>
          </body>
        </html>"#;

    #[test]
    fn extracts_title_and_description() {
        let analysis = analyze_page(PAGE, "rust portfolio");
        assert_eq!(analysis.title.as_deref(), Some("Rust Portfolio - Home"));
        assert_eq!(
            analysis.meta_description.as_deref(),
            Some("A portfolio built in public.")
        );
    }

    #[test]
    fn counts_structure_and_keyword() {
        let analysis = analyze_page(PAGE, "rust portfolio");
        assert_eq!(analysis.h1_count, 1);
        assert_eq!(analysis.images_missing_alt, 1);
        assert_eq!(analysis.keyword_occurrences, 3);
        assert!(analysis.word_count > 10);
    }

    #[test]
    fn empty_page_is_all_zeroes() {
        let analysis = analyze_page("", "rust");
        assert_eq!(analysis.word_count, 0);
        assert_eq!(analysis.h1_count, 0);
        assert!(analysis.title.is_none());
    }
}
