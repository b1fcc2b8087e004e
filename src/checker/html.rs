// src/checker/html.rs
// =============================================================================
// This module extracts link and image references from an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup is repaired rather than rejected
//
// We also use the `url` crate to resolve relative references
// ("/docs", "../about", "#top") into absolute URLs.
//
// Rust concepts:
// - OnceLock: Build a value once, then share it for the rest of the program
// - Iterators and closures: For walking the selected elements
// =============================================================================

use scraper::{Html, Selector};
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

// Everything a page points at, split into links and images
//
// Both lists keep document order and keep duplicates: a link that appears
// twice on the page is probed twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    /// Resolved references from <a href="...">
    pub links: Vec<String>,
    /// Resolved references from <img src="...">
    pub images: Vec<String>,
}

impl ReferenceSet {
    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.images.is_empty()
    }
}

fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a[href]").expect("constant selector is valid"))
}

fn image_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("img[src]").expect("constant selector is valid"))
}

// Extracts every link and image reference from HTML content
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL of the page (for resolving relative references)
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src='logo.png'>"
//   base_url = "https://example.com/"
//   links  = ["https://example.com/docs"]
//   images = ["https://example.com/logo.png"]
//
// No scheme filtering happens here: "mailto:" and "javascript:" hrefs come
// out the other end too, and get probed like everything else.
pub fn extract_references(html: &str, base_url: &str) -> ReferenceSet {
    let base = match Url::parse(base_url) {
        Ok(url) => url,
        Err(e) => {
            // The caller validates the base URL first, so this is unexpected
            debug!("Cannot resolve references against {}: {}", base_url, e);
            return ReferenceSet::default();
        }
    };

    let document = Html::parse_document(html);

    ReferenceSet {
        links: collect_attribute(&document, anchor_selector(), "href", &base),
        images: collect_attribute(&document, image_selector(), "src", &base),
    }
}

// Walks the elements matched by `selector` and resolves their `attr` value
fn collect_attribute(document: &Html, selector: &Selector, attr: &str, base: &Url) -> Vec<String> {
    document
        .select(selector)
        .filter_map(|element| element.value().attr(attr))
        .filter(|value| !value.is_empty())
        .map(|value| resolve_url(base, value))
        .collect()
}

// Resolves a possibly-relative reference to an absolute URL
//
// A reference that already names a scheme is kept exactly as written: no
// trailing slash, no lowercasing, no percent-encoding. Everything else is
// joined against the base following RFC 3986.
//
// A reference that cannot be joined is kept as written too. It is still a
// reference on the page, so the probe gets to fail on it and report it.
//
// Examples:
//   base = "https://example.com/page"
//   href = "/docs"              -> "https://example.com/docs"
//   href = "#section"           -> "https://example.com/page#section"
//   href = "https://other.com"  -> "https://other.com"
//   href = "//exa mple.com/"    -> "//exa mple.com/" (cannot be joined)
fn resolve_url(base: &Url, href: &str) -> String {
    if has_scheme(href) {
        return href.to_string();
    }

    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(e) => {
            debug!("Keeping unresolvable reference {:?} as written: {}", href, e);
            href.to_string()
        }
    }
}

// True for "https://...", "mailto:...", "HTTPS://..." and the like
//
// RFC 3986: scheme = ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ), then ':'
fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
