// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// How it works:
// 1. Parse the page with scraper (an html5ever-based parser)
// 2. Select every <a> tag that carries an href attribute
// 3. Resolve each href against the page URL, so relative links become
//    absolute addresses
// 4. Skip anchors and non-crawlable protocols (mailto:, tel:, javascript:)
// 5. Deduplicate while keeping first-seen order, so a page that links to
//    the same place twice yields one candidate
// =============================================================================

use std::collections::HashSet;

use scraper::{Html, Selector};
use url::Url;

use super::ExtractLinks;

// Extracts <a href> links from HTML content
pub struct HtmlLinkExtractor {
    selector: Selector,
}

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        // "a[href]" is a fixed, known-good selector
        let selector = Selector::parse("a[href]").expect("invalid anchor selector");
        Self { selector }
    }
}

impl Default for HtmlLinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractLinks for HtmlLinkExtractor {
    fn extract(&self, content: &str, base_url: &str) -> Vec<String> {
        // Parse the page URL for resolving relative links; if the base
        // doesn't parse there is nothing to resolve against
        let base = match Url::parse(base_url) {
            Ok(url) => url,
            Err(_) => return Vec::new(),
        };

        let document = Html::parse_document(content);

        let mut seen = HashSet::new();
        let mut links = Vec::new();

        for element in document.select(&self.selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute) = resolve_link(&base, href) {
                    if seen.insert(absolute.clone()) {
                        links.push(absolute);
                    }
                }
            }
        }

        links
    }
}

// Anchors and these protocols have no fetchable page behind them
const SKIP_PREFIXES: [&str; 3] = ["mailto:", "tel:", "javascript:"];

// Resolves a link (possibly relative) to an absolute URL
fn resolve_link(base: &Url, href: &str) -> Option<String> {
    if href.starts_with('#') || SKIP_PREFIXES.iter().any(|p| href.starts_with(p)) {
        return None;
    }

    base.join(href).ok().map(|url| url.to_string())
}
