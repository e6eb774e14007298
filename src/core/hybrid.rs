use std::collections::BTreeMap;
use crate::core::{
    error::EngineError,
    scoring::{clamp_unit, compare_ranked, sort_trait_items, to_percent, trait_similarity},
};
use crate::models::{
    Archetype, Budget, BudgetTier, CompatibleArchetype, DailyRange, DurationDays, Hybrid,
    IdealTrip, Pace, ScoredName, TraitCategory, TraitItem,
};

/// Merge two archetypes into an unsaved synthetic one.
///
/// Traits, destinations and compatibilities are unioned: entries both sides
/// declare are averaged, one-sided entries carry through. Differing pace or
/// budget tier meet at moderate.
///
/// # Errors
/// `IdenticalArchetypes` when both inputs share an id.
pub fn hybridize(a: &Archetype, b: &Archetype) -> Result<Hybrid, EngineError> {
    if a.id.eq_ignore_ascii_case(&b.id) {
        return Err(EngineError::IdenticalArchetypes { id: a.id.clone() });
    }

    let traits = merge_traits(&a.traits, &b.traits);

    let recommended_destinations = merge_scores(
        a.recommended_destinations.iter().map(|d| (d.name.as_str(), d.score)),
        b.recommended_destinations.iter().map(|d| (d.name.as_str(), d.score)),
    )
    .into_iter()
    .map(|(name, score)| ScoredName { name, score })
    .collect();

    let compatible_archetypes = merge_scores(
        a.compatible_archetypes.iter().map(|c| (c.archetype_name.as_str(), c.score)),
        b.compatible_archetypes.iter().map(|c| (c.archetype_name.as_str(), c.score)),
    )
    .into_iter()
    .filter(|(name, _)| !a.is_named(name) && !b.is_named(name))
    .map(|(archetype_name, score)| CompatibleArchetype { archetype_name, score })
    .collect();

    let compatibility = compatibility(a, b);

    tracing::debug!(
        "Hybridized '{}' with '{}' (compatibility: {:.2})",
        a.id,
        b.id,
        compatibility
    );

    Ok(Hybrid {
        archetype: Archetype {
            id: format!("{}+{}", a.id, b.id),
            name: format!("{} / {}", a.name, b.name),
            description: format!("A blend of {} and {}.", a.name, b.name),
            priority: a.priority.min(b.priority),
            is_default: false,
            triggers: Vec::new(),
            traits,
            recommended_destinations,
            ideal_trip: merge_trips(&a.ideal_trip, &b.ideal_trip),
            compatible_archetypes,
        },
        compatibility: to_percent(compatibility),
    })
}

/// Declared compatibility when either side declares the other (mean if both),
/// trait similarity otherwise
fn compatibility(a: &Archetype, b: &Archetype) -> f64 {
    let declared = |from: &Archetype, to: &Archetype| {
        from.compatible_archetypes
            .iter()
            .find(|c| to.is_named(&c.archetype_name))
            .map(|c| clamp_unit(c.score))
    };

    match (declared(a, b), declared(b, a)) {
        (Some(x), Some(y)) => (x + y) / 2.0,
        (Some(x), None) | (None, Some(x)) => x,
        (None, None) => trait_similarity(a, b),
    }
}

/// Union of two named score lists keyed case-insensitively, ranked.
///
/// The first spelling seen is kept as the display name.
fn merge_scores<'x, L, R>(left: L, right: R) -> Vec<(String, f64)>
where
    L: IntoIterator<Item = (&'x str, f64)>,
    R: IntoIterator<Item = (&'x str, f64)>,
{
    let mut merged: BTreeMap<String, (String, Option<f64>, Option<f64>)> = BTreeMap::new();

    for (name, score) in left {
        let entry = merged
            .entry(name.to_lowercase())
            .or_insert_with(|| (name.to_string(), None, None));
        entry.1.get_or_insert(clamp_unit(score));
    }
    for (name, score) in right {
        let entry = merged
            .entry(name.to_lowercase())
            .or_insert_with(|| (name.to_string(), None, None));
        entry.2.get_or_insert(clamp_unit(score));
    }

    let mut out: Vec<(String, f64)> = merged
        .into_values()
        .filter_map(|(name, x, y)| {
            let score = match (x, y) {
                (Some(x), Some(y)) => (x + y) / 2.0,
                (Some(s), None) | (None, Some(s)) => s,
                (None, None) => return None,
            };
            Some((name, score))
        })
        .collect();

    out.sort_by(|a, b| compare_ranked(&a.0, a.1, &b.0, b.1));
    out
}

fn merge_traits(a: &[TraitCategory], b: &[TraitCategory]) -> Vec<TraitCategory> {
    let mut categories: Vec<&str> = Vec::new();
    for category in a.iter().chain(b.iter()) {
        if !categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&category.category))
        {
            categories.push(&category.category);
        }
    }

    categories
        .into_iter()
        .map(|category| {
            let left = items_of(a, category);
            let right = items_of(b, category);
            let mut items: Vec<TraitItem> = merge_scores(
                left.iter().map(|(n, s)| (n.as_str(), *s)),
                right.iter().map(|(n, s)| (n.as_str(), *s)),
            )
            .into_iter()
            .map(|(name, score)| TraitItem { name, score })
            .collect();
            sort_trait_items(&mut items);
            TraitCategory {
                category: category.to_string(),
                items,
            }
        })
        .collect()
}

fn items_of(side: &[TraitCategory], category: &str) -> Vec<(String, f64)> {
    side.iter()
        .filter(|c| c.category.eq_ignore_ascii_case(category))
        .flat_map(|c| c.items.iter().map(|i| (i.name.clone(), i.score)))
        .collect()
}

fn merge_trips(a: &IdealTrip, b: &IdealTrip) -> IdealTrip {
    let min = a.duration_days.min.min(b.duration_days.min);
    let max = a.duration_days.max.max(b.duration_days.max);
    let mean = (f64::from(a.duration_days.ideal) + f64::from(b.duration_days.ideal)) / 2.0;
    let ideal = (mean.round() as u32).clamp(min, max.max(min));

    IdealTrip {
        duration_days: DurationDays { min, max, ideal },
        budget: Budget {
            tier: if a.budget.tier == b.budget.tier {
                a.budget.tier
            } else {
                BudgetTier::Moderate
            },
            daily_range: DailyRange {
                min: a.budget.daily_range.min.min(b.budget.daily_range.min),
                max: a.budget.daily_range.max.max(b.budget.daily_range.max),
            },
        },
        pace: if a.pace == b.pace { a.pace } else { Pace::Moderate },
    }
}
