// src/extract/markdown.rs
// =============================================================================
// Markdown -> HTML rendering for README files.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Ships an HTML renderer that consumes those events
// =============================================================================

use pulldown_cmark::{html, Options, Parser};

use super::html::strip_to_plain_text;

// Renders Markdown text to an HTML string
//
// Example input:
//   "# Intro\n\nHello"
//
// Example output:
//   "<h1>Intro</h1>\n<p>Hello</p>\n"
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);

    let mut rendered = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut rendered, parser);
    rendered
}

// Converts lesson Markdown into its rendered HTML and its plain text
//
// Returns: (html, plain_text)
pub fn convert_lesson_text(markdown: &str) -> (String, String) {
    let rendered = render_markdown(markdown);
    let plain = strip_to_plain_text(&rendered);
    (rendered, plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_and_paragraph() {
        let rendered = render_markdown("# Intro\n\nHello");
        assert_eq!(rendered, "<h1>Intro</h1>\n<p>Hello</p>\n");
    }

    #[test]
    fn test_render_fenced_code() {
        let rendered = render_markdown("```python\nprint(1)\n```\n");
        assert!(rendered.contains("<code class=\"language-python\">print(1)\n</code>"));
    }

    #[test]
    fn test_render_plain_text_body() {
        // The raw host answers 404s with a plain text body; it still renders
        let rendered = render_markdown("404: Not Found");
        assert_eq!(rendered, "<p>404: Not Found</p>\n");
    }

    #[test]
    fn test_convert_lesson_text() {
        let (rendered, plain) = convert_lesson_text("## Objectives\n\n- Learn *Rust*\n");
        assert!(rendered.starts_with("<h2>Objectives</h2>"));
        assert_eq!(plain, "Objectives Learn Rust");
    }
}
