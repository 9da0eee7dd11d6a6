// src/crawl/mod.rs
// =============================================================================
// This module picks the sample pages the metadata check looks at.
//
// When the caller names no pages, the home page is fetched once and its
// same-origin links become the sample, in the order they appear. The home
// page itself always comes first.
// =============================================================================

mod discover;

pub use discover::{discover_sample_pages, extract_same_origin_paths};
