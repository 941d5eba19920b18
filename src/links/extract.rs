// src/links/extract.rs
// =============================================================================
// This module extracts raw link strings from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We look at two attributes:
// - href:      the ordinary hyperlink attribute
// - data-href: a secondary attribute some sites use for scripted navigation
//
// No filtering or normalization happens here. The classifier decides what
// is in scope; this module just reports what the markup says, verbatim.
// =============================================================================

use scraper::{Html, Selector};

// Extracts all raw link strings from HTML content
//
// Returns the attribute values in document order, href values first and
// data-href values second. Empty attributes are skipped silently. There is
// no failure mode: a page with no anchors yields an empty Vec.
//
// Example:
//   html = "<a href='/docs'>Docs</a>"
//   result = ["/docs"]
pub fn extract_links(html: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error. This is OK here because both selectors are constants and known
    // to be valid.
    let href_selector = Selector::parse("a[href]").unwrap();
    let data_href_selector = Selector::parse("a[data-href]").unwrap();

    for element in document.select(&href_selector) {
        if let Some(href) = element.value().attr("href") {
            if !href.is_empty() {
                links.push(href.to_string());
            }
        }
    }

    for element in document.select(&data_href_selector) {
        if let Some(data_href) = element.value().attr("data-href") {
            if !data_href.is_empty() {
                links.push(data_href.to_string());
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_href_links_in_document_order() {
        let html = r#"
            <a href="https://example.com/first">First</a>
            <a href="/second">Second</a>
            <a href="../third">Third</a>
        "#;
        let links = extract_links(html);
        assert_eq!(links, vec!["https://example.com/first", "/second", "../third"]);
    }

    #[test]
    fn test_href_values_come_before_data_href_values() {
        let html = r#"
            <a data-href="/scripted">Scripted</a>
            <a href="/plain">Plain</a>
        "#;
        let links = extract_links(html);
        assert_eq!(links, vec!["/plain", "/scripted"]);
    }

    #[test]
    fn test_empty_attributes_are_skipped() {
        let html = r#"<a href="">Blank</a><a href="/kept">Kept</a>"#;
        let links = extract_links(html);
        assert_eq!(links, vec!["/kept"]);
    }

    #[test]
    fn test_no_anchors_yields_empty_vec() {
        let links = extract_links("<p>No links here</p>");
        assert!(links.is_empty());
    }

    #[test]
    fn test_raw_values_are_not_normalized() {
        // Fragments and mailto links are the classifier's problem, not ours
        let html = r##"<a href="#section">Anchor</a><a href="mailto:a@b.c">Mail</a>"##;
        let links = extract_links(html);
        assert_eq!(links, vec!["#section", "mailto:a@b.c"]);
    }
}
