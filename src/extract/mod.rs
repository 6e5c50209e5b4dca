// src/extract/mod.rs
// =============================================================================
// This module holds the link-extraction and validation collaborators.
//
// Submodules:
// - html: Extracts links from HTML pages with the scraper crate
//
// Both capabilities are pure functions behind small traits:
// - ExtractLinks: page content -> candidate link strings (no I/O)
// - Validate: is this candidate string a crawlable address?
//
// The engine filters every extracted candidate through Validate before it
// is considered for admission; a rejected candidate is silently dropped,
// never an error.
// =============================================================================

mod html;

pub use html::HtmlLinkExtractor;

use url::Url;

// Extracts candidate link strings from fetched page content
//
// base_url is the address the content came from, needed to resolve
// relative links into absolute ones.
pub trait ExtractLinks: Send + Sync {
    fn extract(&self, content: &str, base_url: &str) -> Vec<String>;
}

// Decides whether a candidate string is a crawlable address
pub trait Validate: Send + Sync {
    fn validate(&self, candidate: &str) -> bool;
}

// Accepts exactly the absolute http/https URLs that the url crate can parse
pub struct UrlValidator;

impl Validate for UrlValidator {
    fn validate(&self, candidate: &str) -> bool {
        match Url::parse(candidate) {
            Ok(url) => url.scheme() == "http" || url.scheme() == "https",
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        let validator = UrlValidator;
        assert!(validator.validate("https://example.com/page"));
        assert!(validator.validate("http://example.com"));
    }

    #[test]
    fn test_rejects_other_schemes() {
        let validator = UrlValidator;
        assert!(!validator.validate("ftp://example.com/file"));
        assert!(!validator.validate("mailto:someone@example.com"));
    }

    #[test]
    fn test_rejects_unparseable_strings() {
        let validator = UrlValidator;
        assert!(!validator.validate(""));
        assert!(!validator.validate("not a url"));
        assert!(!validator.validate("/relative/path"));
    }
}
