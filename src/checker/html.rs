// src/checker/html.rs
// =============================================================================
// This module does everything that involves looking at a page's HTML:
// - Extracting the links (href values) to hand to the link validator
// - Checking for the structural elements a usable page should carry
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
// - Tolerates broken HTML instead of erroring (absent elements just mean
//   empty selections)
//
// We also use the `url` crate to:
// - Resolve relative hrefs against the page URL, the way a browser would
//
// Rust concepts:
// - Iterators: For processing collections
// - Option<T>: For attributes that might not be there
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

// Extracts the target of every link on a page, in document order
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   base_url: the URL of the page (for resolving relative hrefs)
//
// Returns: Vec<String> with one entry per anchor that carries a non-empty
// href attribute. Relative hrefs come back resolved against base_url;
// absolute hrefs come back exactly as written.
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   base_url = "https://example.com"
//   result = ["https://example.com/docs"]
//
// Deliberately NOT filtered: mailto:, javascript:, and outright malformed
// hrefs are passed through as-is. The link validator will fetch them,
// the fetch will fail, and the failure lands in the report where the page
// author can see it. Filtering here would hide those links entirely.
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Create a CSS selector to find all <a> tags that have an href
    // Selector::parse returns Result, so we use .unwrap() which panics on error
    // This is OK here because our selector is a constant and known to be valid
    let selector = Selector::parse("a[href]").unwrap();

    // Parse the base URL once; if it doesn't parse we can still collect
    // hrefs, we just can't resolve the relative ones
    let base = match Url::parse(base_url) {
        Ok(url) => Some(url),
        Err(_) => {
            eprintln!("Warning: Invalid base URL: {}", base_url);
            None
        }
    };

    // Walk the anchors in document order
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            // An empty href points nowhere; there is nothing to check
            if href.is_empty() {
                continue;
            }
            links.push(resolve_href(base.as_ref(), href));
        }
    }

    links
}

// Turns an href into the URL the link validator should request
//
// Three cases:
//   already absolute           -> passed through unchanged
//   relative and resolvable    -> joined onto the base URL
//   neither                    -> passed through unchanged (best effort;
//                                 the fetch will report it)
//
// Examples:
//   base = "https://example.com/dir/page"
//   href = "../x" -> "https://example.com/x"
//   href = "https://other.com/a" -> "https://other.com/a"
//   href = "mailto:x@y.com" -> "mailto:x@y.com"
fn resolve_href(base: Option<&Url>, href: &str) -> String {
    // An href that parses on its own already has a scheme; hand it back
    // untouched rather than re-serialized
    if Url::parse(href).is_ok() {
        return href.to_string();
    }

    // Otherwise it's a relative reference: join it onto the base
    // (scheme and authority inherited, paths merged per RFC 3986)
    match base.and_then(|b| b.join(href).ok()) {
        Some(resolved) => resolved.to_string(),
        None => href.to_string(),
    }
}

// Checks a page for the structural elements a user flow needs
//
// Returns one human-readable issue string per missing element kind.
// Both checks always run, so a page can report both issues at once.
// An empty Vec means the page passed.
pub fn check_structure(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let forms = Selector::parse("form").unwrap();
    let buttons = Selector::parse("button").unwrap();

    let mut issues = Vec::new();

    // .next().is_none() asks "is the selection empty?" without walking
    // the whole document
    if document.select(&forms).next().is_none() {
        issues.push("No forms found on the page.".to_string());
    }

    if document.select(&buttons).next().is_none() {
        issues.push("No buttons found on the page.".to_string());
    }

    issues
}
