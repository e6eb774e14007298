use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Affinity for one concrete trait (e.g. "Hiking") within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitItem {
    pub name: String,
    pub score: f64,
}

/// A named group of trait items, ordered by descending score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitCategory {
    pub category: String,
    pub items: Vec<TraitItem>,
}

/// A destination (or any other named entry) carrying a 0-1 score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredName {
    pub name: String,
    pub score: f64,
}

/// Catalog-declared compatibility with another archetype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibleArchetype {
    #[serde(rename = "archetypeName")]
    pub archetype_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetTier {
    Budget,
    Moderate,
    Luxury,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pace {
    Slow,
    Moderate,
    Fast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationHint {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationDays {
    pub min: u32,
    pub max: u32,
    pub ideal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub tier: BudgetTier,
    #[serde(rename = "dailyRange")]
    pub daily_range: DailyRange,
}

/// Ideal-trip envelope of an archetype
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealTrip {
    #[serde(rename = "durationDays")]
    pub duration_days: DurationDays,
    pub budget: Budget,
    pub pace: Pace,
}

/// A tag that selects an archetype during matching.
///
/// When `budget_tier` is set the trigger only fires if the profile's budget
/// hint equals it (e.g. "boutique" only means luxury for big spenders).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub tag: String,
    #[serde(rename = "budgetTier", default, skip_serializing_if = "Option::is_none")]
    pub budget_tier: Option<BudgetTier>,
}

/// Travel-style archetype, the catalog unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: u32,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    pub traits: Vec<TraitCategory>,
    #[serde(rename = "recommendedDestinations", default)]
    pub recommended_destinations: Vec<ScoredName>,
    #[serde(rename = "idealTrip")]
    pub ideal_trip: IdealTrip,
    #[serde(rename = "compatibleArchetypes", default)]
    pub compatible_archetypes: Vec<CompatibleArchetype>,
}

impl Archetype {
    /// Look up a trait category by name, ignoring case
    pub fn category(&self, name: &str) -> Option<&TraitCategory> {
        self.traits
            .iter()
            .find(|c| c.category.eq_ignore_ascii_case(name))
    }

    /// Iterate over every trait item across all categories
    pub fn trait_items(&self) -> impl Iterator<Item = &TraitItem> {
        self.traits.iter().flat_map(|c| c.items.iter())
    }

    /// True if `name` refers to this archetype by id or display name
    pub fn is_named(&self, name: &str) -> bool {
        self.id.eq_ignore_ascii_case(name) || self.name.eq_ignore_ascii_case(name)
    }
}

/// Trip hints carried by cross-cutting tags ("luxury", "relaxed", "weekend", "summer"...)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripHints {
    #[serde(rename = "budgetTier")]
    pub budget_tier: Option<BudgetTier>,
    pub pace: Option<Pace>,
    pub duration: Option<DurationHint>,
    pub season: Option<Season>,
}

/// Caller-specific trait profile built from preference tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub tags: BTreeSet<String>,
    #[serde(rename = "derivedTraits")]
    pub derived_traits: Vec<TraitCategory>,
    /// Lowercase names of vocabulary traits the tags selected
    #[serde(rename = "matchedTraits")]
    pub matched_traits: BTreeSet<String>,
    pub hints: TripHints,
}

/// Matcher output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub archetype: Archetype,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "overlappingTraits")]
    pub overlapping_traits: BTreeSet<String>,
    pub hints: TripHints,
}

/// One ranked recommendation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    pub name: String,
    #[serde(rename = "scorePercent")]
    pub score_percent: u8,
}

/// Trip envelope suggested for the matched archetype after applying hints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripSuggestion {
    #[serde(rename = "durationDays")]
    pub duration_days: u32,
    #[serde(rename = "budgetTier")]
    pub budget_tier: BudgetTier,
    #[serde(rename = "dailyRange")]
    pub daily_range: DailyRange,
    pub pace: Pace,
    pub season: Option<Season>,
}

/// Recommender output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub destinations: Vec<RankedItem>,
    pub activities: Vec<RankedItem>,
    #[serde(rename = "accommodationTypes")]
    pub accommodation_types: Vec<RankedItem>,
    pub dining: Vec<RankedItem>,
    #[serde(rename = "compatibleArchetypes")]
    pub compatible_archetypes: Vec<RankedItem>,
    pub trip: TripSuggestion,
}

/// Synthetic archetype produced by merging two archetypes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hybrid {
    pub archetype: Archetype,
    /// Compatibility between the two inputs, 0-100
    pub compatibility: u8,
}

/// Matching weights
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchingWeights {
    /// Match score points added per overlapping trait
    pub overlap: u32,
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self { overlap: 5 }
    }
}
