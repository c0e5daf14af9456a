// src/parsers/dom.rs

//! DOM walking helpers shared by the site parsers.

use scraper::{ElementRef, Selector};

use crate::error::{DocError, Result};
use crate::models::{Comment, Example, Note};

/// Decorative marks the sites put next to names and signatures.
const SOURCE_MARKERS: &[char] = &['¶', '↗', '§'];

/// Compile a CSS selector.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| DocError::selector(s, format!("{e:?}")))
}

/// Following element siblings up to (not including) the first one matching `stop`.
pub fn next_until<'a>(element: ElementRef<'a>, stop: &Selector) -> Vec<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|sibling| !stop.matches(sibling))
        .collect()
}

/// All text inside an element, concatenated.
pub fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trim whitespace and decorative markers from both ends.
pub fn strip_markers(s: &str) -> &str {
    s.trim().trim_matches(SOURCE_MARKERS).trim()
}

/// Classify sibling nodes into comment notes, keeping document order.
pub fn comments(nodes: &[ElementRef<'_>]) -> Comment {
    nodes.iter().filter_map(|node| note(*node)).collect()
}

fn note(node: ElementRef<'_>) -> Option<Note> {
    match node.value().name() {
        "p" => Some(Note::Paragraph(collapse_whitespace(&text(node)))),
        "pre" => Some(Note::Pre(text(node))),
        // Headings without an id are page decoration
        "h2" | "h3" | "h4" => {
            let id = node.value().attr("id").unwrap_or("");
            if id.is_empty() {
                None
            } else {
                Some(Note::Heading(heading_text(node)))
            }
        }
        _ => None,
    }
}

/// A heading's own leading text, ignoring trailing anchor links.
fn heading_text(node: ElementRef<'_>) -> String {
    let own = node
        .children()
        .find_map(|child| child.value().as_text().map(|t| t.to_string()))
        .filter(|t| !t.trim().is_empty());
    let raw = own.unwrap_or_else(|| text(node));
    strip_markers(&raw).to_string()
}

/// Selectors describing where a site keeps its example panels.
pub struct ExampleSelectors {
    pub panel: Selector,
    pub summary: Selector,

    /// Code and output blocks; the first match is the code, the last the output
    pub blocks: Selector,
}

/// Collect the example panels found at or below the given nodes.
pub fn examples(nodes: &[ElementRef<'_>], selectors: &ExampleSelectors) -> Vec<Example> {
    let mut found = Vec::new();
    for node in nodes {
        if selectors.panel.matches(node) {
            found.push(example(*node, selectors));
            continue;
        }
        for panel in node.select(&selectors.panel) {
            found.push(example(panel, selectors));
        }
    }
    found
}

fn example(panel: ElementRef<'_>, selectors: &ExampleSelectors) -> Example {
    // typically "Example¶"
    let name = panel
        .select(&selectors.summary)
        .next()
        .map(text)
        .unwrap_or_default();

    let blocks: Vec<String> = panel.select(&selectors.blocks).map(text).collect();
    let code = blocks.first().cloned().unwrap_or_default();
    let output = blocks.last().cloned().unwrap_or_default();

    Example::new(strip_markers(&name), code, output)
}
