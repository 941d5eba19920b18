// src/sitemap/mod.rs
// =============================================================================
// This module turns the crawl's page records into the sitemap.xml artifact.
//
// Submodules:
// - writer: Dedup, output-path resolution, XML serialization, file write
//
// It runs exactly once, after the traversal is done, on a read-only view
// of the records - nothing here feeds back into the crawl.
// =============================================================================

mod writer;

// Re-export the one entry point
pub use writer::write_sitemap;
