// src/crawl/mod.rs
// =============================================================================
// This module handles link discovery.
//
// Features:
// - One hop from the start page, never further
// - Same-site heuristic: a link must contain the start URL
// - Count limit that includes the start page itself
// - Failure degrades to scanning only the start page
// =============================================================================

mod links;

// Re-export the discovery functions
pub use links::{discover_links, extract_same_site_links};
