//! Tripstyle - travel style matching and recommendation engine
//!
//! Turns a handful of preference tags into a trait profile, matches it to a
//! travel-style archetype from a static catalog, and recommends destinations,
//! activities and companion styles from the match. Two archetypes can also be
//! blended into a hybrid.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{hybridize, recommend, EngineError, Matcher, ProfileBuilder};
pub use models::{Archetype, Catalog, Hybrid, MatchResult, Profile, RecommendationSet};
pub use services::{builtin_catalog, load_catalog, CatalogError, StyleEngine};
