//! Service layer: fetching documentation pages and caching the results.
//!
//! - `HttpSearcher` requests and parses one page per search
//! - `CachedSearcher` wraps any `Searcher` with an in-memory cache

mod cache;
mod searcher;

pub use cache::{CachedPackage, CachedSearcher};
pub use searcher::{HttpSearcher, Searcher};
