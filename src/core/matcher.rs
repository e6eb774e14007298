use std::collections::BTreeSet;
use crate::core::{error::EngineError, scoring::tag_matches_trait};
use crate::models::{Archetype, MatchResult, MatchingWeights, Profile, Trigger};

/// Lowest match score ever reported; a match is always "likely"
pub const MATCH_SCORE_FLOOR: u8 = 70;
pub const MATCH_SCORE_CEILING: u8 = 100;

/// Selects an archetype for a profile and scores the match
///
/// # Selection
/// Archetypes are evaluated by ascending priority (catalog order breaks
/// ties). The first one with a firing trigger wins; when none fires, the
/// default archetype is used (the flagged one, else the last evaluated).
///
/// # Confidence
/// `70 + overlap_weight * |overlapping traits|`, capped at 100.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: MatchingWeights,
}

impl Matcher {
    pub fn new(weights: MatchingWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: MatchingWeights::default(),
        }
    }

    pub fn weights(&self) -> MatchingWeights {
        self.weights
    }

    /// Match a profile against the catalog archetypes
    ///
    /// # Errors
    /// `NoArchetypesAvailable` when `catalog` is empty. An empty profile is
    /// not an error; it falls through to the default archetype.
    pub fn find_match(
        &self,
        profile: &Profile,
        catalog: &[Archetype],
    ) -> Result<MatchResult, EngineError> {
        let ordered = evaluation_order(catalog);

        let triggered = ordered
            .iter()
            .copied()
            .find(|archetype| archetype.triggers.iter().any(|t| fires(t, profile)));

        let archetype = match triggered {
            Some(archetype) => archetype,
            None => ordered
                .iter()
                .copied()
                .find(|a| a.is_default)
                .or_else(|| ordered.last().copied())
                .ok_or(EngineError::NoArchetypesAvailable)?,
        };

        let overlapping_traits = overlapping_traits(archetype, profile);
        let match_score = self.match_score(overlapping_traits.len());

        tracing::debug!(
            "Matched archetype '{}' (triggered: {}, score: {}, overlaps: {:?})",
            archetype.id,
            triggered.is_some(),
            match_score,
            overlapping_traits
        );

        Ok(MatchResult {
            archetype: archetype.clone(),
            match_score,
            overlapping_traits,
            hints: profile.hints,
        })
    }

    /// Confidence for a given number of overlapping traits
    pub fn match_score(&self, overlaps: usize) -> u8 {
        let overlaps = u32::try_from(overlaps).unwrap_or(u32::MAX);
        let raw = u32::from(MATCH_SCORE_FLOOR)
            .saturating_add(self.weights.overlap.saturating_mul(overlaps));
        raw.min(u32::from(MATCH_SCORE_CEILING)) as u8
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Archetypes by ascending priority; the sort is stable so catalog order breaks ties
fn evaluation_order(catalog: &[Archetype]) -> Vec<&Archetype> {
    let mut ordered: Vec<&Archetype> = catalog.iter().collect();
    ordered.sort_by_key(|a| a.priority);
    ordered
}

#[inline]
fn fires(trigger: &Trigger, profile: &Profile) -> bool {
    let tag = trigger.tag.trim().to_lowercase();
    if !profile.tags.contains(&tag) {
        return false;
    }
    match trigger.budget_tier {
        Some(tier) => profile.hints.budget_tier == Some(tier),
        None => true,
    }
}

/// Lowercase archetype trait names that overlap a caller tag, directly or
/// through a vocabulary alias the profile already resolved
fn overlapping_traits(archetype: &Archetype, profile: &Profile) -> BTreeSet<String> {
    archetype
        .trait_items()
        .map(|item| item.name.to_lowercase())
        .filter(|name| {
            profile.matched_traits.contains(name)
                || profile.tags.iter().any(|tag| tag_matches_trait(tag, name))
        })
        .collect()
}
