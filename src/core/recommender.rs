use crate::core::scoring::rank_scored;
use crate::models::{
    Archetype, DurationHint, MatchResult, RankedItem, RecommendationSet, TripHints, TripSuggestion,
};

pub const ACTIVITIES: &str = "Activities";
pub const ACCOMMODATIONS: &str = "Accommodations";
pub const DINING: &str = "Dining";

/// Project a match into ranked recommendations.
///
/// Everything is read from the matched archetype and re-ranked; catalog
/// ordering is never trusted. The archetype's own entry is dropped from
/// its compatibility list.
pub fn recommend(result: &MatchResult) -> RecommendationSet {
    recommend_for(&result.archetype, &result.hints)
}

/// Recommend straight from an archetype, e.g. a hybrid that no caller matched
pub fn recommend_for(archetype: &Archetype, hints: &TripHints) -> RecommendationSet {
    let destinations = rank_scored(
        archetype
            .recommended_destinations
            .iter()
            .map(|d| (d.name.as_str(), d.score)),
    );

    let compatible_archetypes = rank_scored(
        archetype
            .compatible_archetypes
            .iter()
            .filter(|c| !archetype.is_named(&c.archetype_name))
            .map(|c| (c.archetype_name.as_str(), c.score)),
    );

    RecommendationSet {
        destinations,
        activities: ranked_category(archetype, ACTIVITIES),
        accommodation_types: ranked_category(archetype, ACCOMMODATIONS),
        dining: ranked_category(archetype, DINING),
        compatible_archetypes,
        trip: suggest_trip(archetype, hints),
    }
}

fn ranked_category(archetype: &Archetype, category: &str) -> Vec<RankedItem> {
    archetype
        .category(category)
        .map(|c| rank_scored(c.items.iter().map(|i| (i.name.as_str(), i.score))))
        .unwrap_or_default()
}

/// The archetype's ideal trip, bent towards whatever the caller hinted at
fn suggest_trip(archetype: &Archetype, hints: &TripHints) -> TripSuggestion {
    let ideal = &archetype.ideal_trip;
    let duration_days = match hints.duration {
        Some(DurationHint::Short) => ideal.duration_days.min,
        Some(DurationHint::Long) => ideal.duration_days.max,
        None => ideal.duration_days.ideal,
    };

    TripSuggestion {
        duration_days,
        budget_tier: hints.budget_tier.unwrap_or(ideal.budget.tier),
        daily_range: ideal.budget.daily_range,
        pace: hints.pace.unwrap_or(ideal.pace),
        season: hints.season,
    }
}
