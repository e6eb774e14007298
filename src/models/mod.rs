// Model exports
pub mod catalog;
pub mod domain;
pub mod requests;
pub mod responses;

pub use catalog::{Catalog, TraitDefinition, TraitVocabulary, CATALOG_VERSION};
pub use domain::{
    Archetype, Budget, BudgetTier, CompatibleArchetype, DailyRange, DurationDays, DurationHint,
    Hybrid, IdealTrip, MatchResult, MatchingWeights, Pace, Profile, RankedItem, RecommendationSet,
    ScoredName, Season, TraitCategory, TraitItem, Trigger, TripHints, TripSuggestion,
};
pub use requests::{HybridRequest, TagsRequest};
pub use responses::{ErrorResponse, HealthResponse, HybridResponse, MatchResponse};
