// src/links/mod.rs
// =============================================================================
// This module handles everything between "we fetched a page" and "these are
// the URLs worth crawling next".
//
// Submodules:
// - extract: Pulls raw href-like strings out of parsed HTML
// - classify: Decides, per link, whether it is in scope for the crawl and
//   normalizes it into an absolute fetchable URL
//
// Both are pure, stateless helpers - the crawl engine calls them once per
// fetched page and owns all the state itself.
// =============================================================================

mod classify;
mod extract;

// Re-export public items from submodules
// This lets callers write `links::classify()` instead of
// `links::classify::classify()`
pub use classify::{classify, Classification, RejectReason};
pub use extract::extract_links;
