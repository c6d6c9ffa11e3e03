// src/extract/html.rs
// =============================================================================
// This module pulls plain text and repository links out of HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Canvas page bodies and assignment descriptions are HTML fragments.
// README files are Markdown, but the reading-time estimator still runs them
// through the HTML parser so that inline HTML and plain text both become
// text nodes.
// =============================================================================

use scraper::{Html, Node, Selector};

// Returns every text and comment node of the document, in document order
//
// Whitespace-only nodes are kept: word counting treats them as tokens too.
// Comments count as text here, so a README's hidden notes add to its
// reading time.
pub fn text_nodes(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .tree
        .root()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) => Some(text.text.to_string()),
            Node::Comment(comment) => Some(comment.comment.to_string()),
            _ => None,
        })
        .collect()
}

// Parses the source as an HTML document and serializes it back
//
// Plain text comes back wrapped in <html><head></head><body>..</body></html>.
pub fn serialize_document(source: &str) -> String {
    Html::parse_document(source).root_element().html()
}

// Strips all markup and returns the text content on a single line
//
// Example:
//   "<p>a\n\nb</p>" -> "a b"
pub fn strip_to_plain_text(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let document = Html::parse_document(html);
    let joined: String = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect();

    // Newline runs and internal whitespace collapse to single spaces
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Finds the repository link for a piece of Canvas content
//
// Only the FIRST anchor of the document is considered. If it does not point
// at the repository host, the content has no repository link, even when a
// later anchor would match. Lessons put the repository link first, and
// anything else is a regular reference link.
//
// Parameters:
//   html: page body or assignment description (may be empty)
//   prefix: web prefix of the hosting platform, e.g. "https://github.com/"
pub fn first_repo_link(html: &str, prefix: &str) -> Option<String> {
    if html.is_empty() {
        return None;
    }

    let document = Html::parse_fragment(html);

    // Constant selector, cannot fail to parse
    let selector = Selector::parse("a").unwrap();

    let first_anchor = document.select(&selector).next()?;
    let href = first_anchor.value().attr("href")?;

    if href.starts_with(prefix) {
        Some(href.to_string())
    } else {
        None
    }
}
