// src/crawl/mod.rs
// =============================================================================
// This module handles crawling the website and recording what it finds.
//
// Submodules:
// - fetch: The PageFetcher trait (fetching as a capability) plus the real
//   reqwest-backed implementation
// - engine: The traversal itself - depth-first work list, visited set,
//   and the PageRecord collection that feeds the sitemap
//
// The engine never talks to the network directly; it only sees a
// PageFetcher, which is what lets the tests drive it with canned pages.
// =============================================================================

mod engine;
mod fetch;

// Re-export public items from submodules
pub use engine::{ChangeFrequency, Crawler, PageRecord};
pub use fetch::{HttpFetcher, PageFetcher};
