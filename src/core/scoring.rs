use std::cmp::Ordering;
use std::collections::BTreeMap;
use crate::models::{Archetype, RankedItem, TraitItem};

/// Clamp a catalog or computed score into 0-1
///
/// Non-finite values score 0 so one malformed catalog entry can't poison a ranking.
#[inline]
pub fn clamp_unit(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// Format a 0-1 score as a rounded 0-100 percentage
#[inline]
pub fn to_percent(score: f64) -> u8 {
    (clamp_unit(score) * 100.0).round() as u8
}

/// True when a lowercase tag and a lowercase trait name overlap.
///
/// Overlap is a substring match in either direction, so "beach" selects
/// "beach relaxation" and "luxury resorts spa" selects "luxury resorts".
#[inline]
pub fn tag_matches_trait(tag: &str, trait_name: &str) -> bool {
    if tag.is_empty() || trait_name.is_empty() {
        return false;
    }
    trait_name.contains(tag) || tag.contains(trait_name)
}

/// Descending by score, then name ascending (case-insensitive first, exact second)
pub fn compare_ranked(a_name: &str, a_score: f64, b_name: &str, b_score: f64) -> Ordering {
    clamp_unit(b_score)
        .total_cmp(&clamp_unit(a_score))
        .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        .then_with(|| a_name.cmp(b_name))
}

/// Sort trait items into canonical order in place
pub fn sort_trait_items(items: &mut [TraitItem]) {
    items.sort_by(|a, b| compare_ranked(&a.name, a.score, &b.name, b.score));
}

/// Rank named scores and format them as percentages.
///
/// The input order is never trusted; entries are re-sorted here.
pub fn rank_scored<'a, I>(entries: I) -> Vec<RankedItem>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut ranked: Vec<(&str, f64)> = entries
        .into_iter()
        .map(|(name, score)| (name, clamp_unit(score)))
        .collect();

    ranked.sort_by(|a, b| compare_ranked(a.0, a.1, b.0, b.1));

    ranked
        .into_iter()
        .map(|(name, score)| RankedItem {
            name: name.to_string(),
            score_percent: to_percent(score),
        })
        .collect()
}

/// Trait-vector similarity between two archetypes (0-1)
///
/// `1 - mean |a - b|` over the union of (category, trait) keys; a trait only
/// one side declares counts as 0 on the other.
pub fn trait_similarity(a: &Archetype, b: &Archetype) -> f64 {
    let mut keyed: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();

    for category in &a.traits {
        for item in &category.items {
            let key = (category.category.to_lowercase(), item.name.to_lowercase());
            keyed.entry(key).or_insert((0.0, 0.0)).0 = clamp_unit(item.score);
        }
    }
    for category in &b.traits {
        for item in &category.items {
            let key = (category.category.to_lowercase(), item.name.to_lowercase());
            keyed.entry(key).or_insert((0.0, 0.0)).1 = clamp_unit(item.score);
        }
    }

    if keyed.is_empty() {
        return 0.0;
    }

    let total_diff: f64 = keyed.values().map(|(x, y)| (x - y).abs()).sum();
    clamp_unit(1.0 - total_diff / keyed.len() as f64)
}
