// src/fetch/html.rs
// =============================================================================
// This module turns an HTML page into the two things the crawler needs:
// - the visible text, for the entity extractors
// - the outbound links, for the frontier
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever, the browser-grade parser)
// - Supports CSS selectors for finding elements
// - Never fails: broken markup is repaired the way a browser would, so a
//   malformed page degrades to whatever text and links survive parsing
//
// We also use the `url` crate to resolve relative links against the page URL.
// =============================================================================

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Node, Selector};
use url::Url;

use crate::extract::is_profile_link;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

// Elements whose text never shows up on screen
const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

// Elements that start a new line of text
const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "html", "li",
    "main", "nav", "ol", "p", "pre", "section", "table", "td", "th", "tr", "ul",
];

// Anchor schemes that are not followed but whose target is worth extracting
const CONTACT_SCHEMES: &[&str] = &["mailto:", "tel:"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Visible text, one line per block element, followed by the raw
    /// mailto:/tel: anchor targets and the social profile links, one per line
    pub text: String,
    /// Absolute http(s) links, first occurrence order, no duplicates
    pub links: Vec<String>,
}

pub fn parse_page(html: &str, base_url: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    let links = extract_links(&document, base_url);

    let mut text = extract_text(&document);
    let profiles = links.iter().filter(|link| is_profile_link(link)).cloned();
    for target in contact_targets(&document).into_iter().chain(profiles) {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&target);
    }

    ParsedPage { text, links }
}

// Collects the visible text of a document.
//
// Text nodes inside the same block element are joined with a space, so
// "<p>Call <b>(555)</b> 123-4567</p>" reads as one line; a new block starts
// a new line, so unrelated paragraphs never run into each other.
pub fn extract_text(document: &Html) -> String {
    let mut text = String::new();
    let mut current_block = None;

    for node in document.root_element().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };

        let mut hidden = false;
        let mut block = None;
        for ancestor in node.ancestors() {
            let Some(element) = ancestor.value().as_element() else {
                continue;
            };
            if HIDDEN.contains(&element.name()) {
                hidden = true;
                break;
            }
            if block.is_none() && BLOCKS.contains(&element.name()) {
                block = Some(ancestor.id());
            }
        }
        if hidden {
            continue;
        }

        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }

        if !text.is_empty() {
            text.push(if block == current_block { ' ' } else { '\n' });
        }
        text.push_str(fragment);
        current_block = block;
    }

    text
}

// Extracts all followable links from a document
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
pub fn extract_links(document: &Html, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the base URL once; without it relative links can't be resolved
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(error) => {
            tracing::debug!(base_url, %error, "invalid base URL, skipping links");
            return links;
        }
    };

    let mut seen = HashSet::new();
    for href in anchor_targets(document) {
        if let Some(absolute_url) = resolve_url(&base, href) {
            if seen.insert(absolute_url.clone()) {
                links.push(absolute_url);
            }
        }
    }

    links
}

// Raw mailto:/tel: targets, in document order
fn contact_targets(document: &Html) -> Vec<String> {
    anchor_targets(document)
        .filter(|href| {
            let lower = href.trim().to_ascii_lowercase();
            CONTACT_SCHEMES.iter().any(|scheme| lower.starts_with(scheme))
        })
        .map(|href| href.trim().to_string())
        .collect()
}

fn anchor_targets(document: &Html) -> impl Iterator<Item = &str> {
    document
        .select(&ANCHOR)
        .filter_map(|element| element.value().attr("href"))
}

// Resolves a possibly-relative href to an absolute http(s) URL
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs" -> Some("https://example.com/docs")
//   href = "../other" -> Some("https://example.com/other")
//   href = "#top" -> None (same page)
//   href = "javascript:void(0)" -> None (not HTTP)
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let url = base.join(href).ok()?;
    match url.scheme() {
        "http" | "https" => Some(url.to_string()),
        _ => None,
    }
}
