use std::collections::BTreeSet;
use crate::core::scoring::{clamp_unit, sort_trait_items, tag_matches_trait};
use crate::models::{
    BudgetTier, DurationHint, Pace, Profile, Season, TraitCategory, TraitDefinition, TraitItem,
    TraitVocabulary, TripHints,
};

/// Score given to a trait the caller's tags selected
pub const MATCHED_TRAIT_SCORE: f64 = 0.9;

/// Cross-cutting tags that shape the trip rather than score a trait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpecialTag {
    Budget(BudgetTier),
    Pace(Pace),
    Duration(DurationHint),
    Season(Season),
}

fn special_tag(tag: &str) -> Option<SpecialTag> {
    let special = match tag {
        "luxury" | "premium" | "high-end" | "splurge" => SpecialTag::Budget(BudgetTier::Luxury),
        "budget" | "cheap" | "backpacker" => SpecialTag::Budget(BudgetTier::Budget),
        "mid-range" => SpecialTag::Budget(BudgetTier::Moderate),
        "relaxed" | "slow" | "leisurely" => SpecialTag::Pace(Pace::Slow),
        "active" | "fast" | "packed" => SpecialTag::Pace(Pace::Fast),
        "weekend" | "short" | "short trip" => SpecialTag::Duration(DurationHint::Short),
        "long" | "long trip" | "extended" | "sabbatical" => SpecialTag::Duration(DurationHint::Long),
        "spring" => SpecialTag::Season(Season::Spring),
        "summer" => SpecialTag::Season(Season::Summer),
        "autumn" | "fall" => SpecialTag::Season(Season::Autumn),
        "winter" => SpecialTag::Season(Season::Winter),
        _ => return None,
    };
    Some(special)
}

/// Lowercase, trim and deduplicate caller tags, dropping blanks
pub fn normalize_tags<I, S>(tags: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tags.into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// A hint is only set when every tag that speaks to it agrees
fn agreed<T: Copy + PartialEq>(values: &[T]) -> Option<T> {
    let first = *values.first()?;
    values.iter().all(|v| *v == first).then_some(first)
}

/// Builds caller profiles against the catalog's trait vocabulary
#[derive(Debug, Clone, Copy)]
pub struct ProfileBuilder<'a> {
    vocabulary: &'a [TraitVocabulary],
}

impl<'a> ProfileBuilder<'a> {
    pub fn new(vocabulary: &'a [TraitVocabulary]) -> Self {
        Self { vocabulary }
    }

    /// Build a profile from free-text preference tags.
    ///
    /// Every vocabulary trait gets a score: `MATCHED_TRAIT_SCORE` when a tag
    /// overlaps its name or one of its aliases, its category baseline otherwise.
    /// Tags that match nothing are kept in `tags` and otherwise ignored.
    pub fn build_profile<I, S>(&self, tags: I) -> Profile
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = normalize_tags(tags);

        let mut budgets = Vec::new();
        let mut paces = Vec::new();
        let mut durations = Vec::new();
        let mut seasons = Vec::new();
        let mut trait_tags = Vec::new();

        for tag in &tags {
            match special_tag(tag) {
                Some(SpecialTag::Budget(tier)) => budgets.push(tier),
                Some(SpecialTag::Pace(pace)) => paces.push(pace),
                Some(SpecialTag::Duration(hint)) => durations.push(hint),
                Some(SpecialTag::Season(season)) => seasons.push(season),
                None => trait_tags.push(tag.as_str()),
            }
        }

        let hints = TripHints {
            budget_tier: agreed(&budgets),
            pace: agreed(&paces),
            duration: agreed(&durations),
            season: agreed(&seasons),
        };

        let mut matched_traits = BTreeSet::new();
        let derived_traits = self
            .vocabulary
            .iter()
            .map(|vocab| {
                let mut items: Vec<TraitItem> = vocab
                    .traits
                    .iter()
                    .map(|def| {
                        let selected = is_selected(def, &trait_tags);
                        if selected {
                            matched_traits.insert(def.name.to_lowercase());
                        }
                        TraitItem {
                            name: def.name.clone(),
                            score: if selected {
                                MATCHED_TRAIT_SCORE
                            } else {
                                clamp_unit(def.baseline)
                            },
                        }
                    })
                    .collect();
                sort_trait_items(&mut items);
                TraitCategory {
                    category: vocab.category.clone(),
                    items,
                }
            })
            .collect();

        tracing::debug!(
            "Built profile: {} tags, {} matched traits, hints={:?}",
            tags.len(),
            matched_traits.len(),
            hints
        );

        Profile {
            tags,
            derived_traits,
            matched_traits,
            hints,
        }
    }
}

fn is_selected(def: &TraitDefinition, tags: &[&str]) -> bool {
    let name = def.name.to_lowercase();
    tags.iter().any(|tag| {
        tag_matches_trait(tag, &name)
            || def
                .aliases
                .iter()
                .any(|alias| tag_matches_trait(tag, &alias.to_lowercase()))
    })
}
