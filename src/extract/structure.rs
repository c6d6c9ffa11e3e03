// src/extract/structure.rs
// =============================================================================
// Rewrites a Canvas page (HTML) into sectioned Markdown.
//
// Canvas lesson pages are written as a flat run of siblings:
//
//   <h3>Section</h3> <p>..</p> <h4>Sub</h4> <ul>..</ul> <h3>Next</h3> ...
//
// Each <h3> opens a section. We walk the siblings that follow it, one by
// one, and stop exactly at the next <h3>. The DOM is only read, never
// changed, so the walk is a plain loop over `next_sibling()` links.
// =============================================================================

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

// Converts an HTML page into Markdown with a title and one section per <h3>
//
// Output shape:
//   # {title}
//
//   ## {first h3}
//
//   ...rendered siblings...
//
//   ## {second h3}
//   ...
pub fn html_to_structured_markdown(title: &str, html: &str) -> String {
    let mut markdown = format!("# {}\n\n", title);

    let fragment = Html::parse_fragment(html);
    let h3 = Selector::parse("h3").unwrap();

    for section in fragment.select(&h3) {
        let mut section_text = format!("## {}\n\n", element_text(&section));

        let mut next = section.next_sibling();
        while let Some(node) = next {
            if is_section_heading(node) {
                break;
            }
            section_text.push_str(&render_node(node));
            next = node.next_sibling();
        }

        markdown.push_str(&section_text);
        markdown.push('\n');
    }

    markdown
}

fn is_section_heading(node: NodeRef<'_, Node>) -> bool {
    matches!(node.value(), Node::Element(el) if el.name() == "h3")
}

// Renders a single sibling node
fn render_node(node: NodeRef<'_, Node>) -> String {
    match node.value() {
        Node::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                String::new()
            } else {
                format!("{}\n\n", trimmed)
            }
        }
        Node::Element(_) => match ElementRef::wrap(node) {
            Some(element) => render_element(&element),
            None => String::new(),
        },
        // Comments, doctypes, processing instructions
        _ => String::new(),
    }
}

fn render_element(element: &ElementRef<'_>) -> String {
    match element.value().name() {
        "h4" => format!("### {}\n\n", element_text(element)),
        "p" => format!("{}\n\n", element_text(element)),
        "em" | "strong" => format!("**{}** \n\n", element_text(element)),
        "ul" | "ol" => {
            let li = Selector::parse("li").unwrap();
            let mut list: String = element.select(&li).map(|item| render_list_item(&item)).collect();
            list.push('\n');
            list
        }
        "li" => render_list_item(element),
        "code" => format!("`{}`", element_text(element)),
        // Anything else is kept as-is; Markdown allows inline HTML
        _ => format!("{}\n\n", element.html()),
    }
}

fn render_list_item(item: &ElementRef<'_>) -> String {
    let code = Selector::parse("code").unwrap();

    match item.select(&code).next() {
        Some(code) => format!("- `{}`\n", element_text(&code)),
        None => format!("- {}\n", element_text(item)),
    }
}

// All descendant text of an element, whitespace collapsed
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
