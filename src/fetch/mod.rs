// src/fetch/mod.rs
// =============================================================================
// Everything needed to download a page.
//
// Submodules:
// - buffer: reusable byte buffers for response bodies
// - http: the shared client and the http -> https retry
// =============================================================================

mod buffer;
mod http;

pub use buffer::{BufferPool, PooledBuffer};
pub use http::{upgrade_to_https, Fetcher, Page};
