// Core algorithm exports
pub mod error;
pub mod hybrid;
pub mod matcher;
pub mod profile;
pub mod recommender;
pub mod scoring;

pub use error::EngineError;
pub use hybrid::hybridize;
pub use matcher::{Matcher, MATCH_SCORE_CEILING, MATCH_SCORE_FLOOR};
pub use profile::{normalize_tags, ProfileBuilder, MATCHED_TRAIT_SCORE};
pub use recommender::{recommend, recommend_for};
pub use scoring::{clamp_unit, rank_scored, tag_matches_trait, to_percent, trait_similarity};
