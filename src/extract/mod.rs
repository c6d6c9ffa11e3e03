// src/extract/mod.rs
// =============================================================================
// Text extraction from Canvas HTML and GitHub Markdown.
//
// Submodules:
// - html: plain text, text nodes, and the repository link of a page
// - markdown: Markdown -> HTML rendering
// - structure: HTML page -> sectioned Markdown
// =============================================================================

mod html;
mod markdown;
mod structure;

pub use html::{first_repo_link, serialize_document, strip_to_plain_text, text_nodes};
pub use markdown::{convert_lesson_text, render_markdown};
pub use structure::html_to_structured_markdown;
