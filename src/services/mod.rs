// Service exports
pub mod cache;
pub mod catalog;
pub mod engine;

pub use cache::{CacheKey, CacheStats, MatchCache};
pub use catalog::{builtin_catalog, load_catalog, parse_catalog, CatalogError, BUILTIN_CATALOG};
pub use engine::StyleEngine;
