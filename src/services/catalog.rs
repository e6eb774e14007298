use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use thiserror::Error;
use crate::core::scoring::{clamp_unit, compare_ranked, sort_trait_items};
use crate::models::{
    Archetype, Catalog, CompatibleArchetype, IdealTrip, ScoredName, TraitCategory,
    TraitVocabulary, Trigger, CATALOG_VERSION,
};

/// Seed catalog compiled into the binary
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Errors that can occur while loading the archetype catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported catalog version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("invalid catalog entry #{index}: {reason}")]
    InvalidCatalogEntry { index: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    version: u32,
    #[serde(rename = "traitVocabulary", default)]
    vocabulary: Vec<TraitVocabulary>,
    #[serde(default)]
    archetypes: Vec<serde_json::Value>,
}

/// Archetype record as written in the data file; required fields are checked by hand
#[derive(Debug, Deserialize)]
struct RawArchetype {
    id: Option<String>,
    name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: u32,
    #[serde(rename = "isDefault", default)]
    is_default: bool,
    #[serde(default)]
    triggers: Vec<Trigger>,
    traits: Option<Vec<TraitCategory>>,
    #[serde(rename = "recommendedDestinations", default)]
    recommended_destinations: Vec<ScoredName>,
    #[serde(rename = "idealTrip")]
    ideal_trip: Option<IdealTrip>,
    #[serde(rename = "compatibleArchetypes", default)]
    compatible_archetypes: Vec<CompatibleArchetype>,
}

/// Load the catalog compiled into the binary
pub fn builtin_catalog() -> Result<Catalog, CatalogError> {
    parse_catalog(BUILTIN_CATALOG)
}

/// Load and validate a catalog data file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&json)
}

/// Parse and validate catalog JSON.
///
/// Any malformed archetype rejects the whole catalog. Out-of-range scores are
/// accepted but clamped into 0-1, and every scored list is stored in ranked order.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogError> {
    let raw: RawCatalog = serde_json::from_str(json)?;

    if raw.version != CATALOG_VERSION {
        return Err(CatalogError::UnsupportedVersion {
            found: raw.version,
            expected: CATALOG_VERSION,
        });
    }

    let categories: BTreeSet<String> = raw
        .vocabulary
        .iter()
        .map(|v| v.category.to_lowercase())
        .collect();

    let mut seen_ids = BTreeSet::new();
    let mut archetypes = Vec::with_capacity(raw.archetypes.len());

    for (index, value) in raw.archetypes.into_iter().enumerate() {
        let invalid = |reason: String| CatalogError::InvalidCatalogEntry { index, reason };

        let entry: RawArchetype =
            serde_json::from_value(value).map_err(|e| invalid(e.to_string()))?;
        let archetype = validate_entry(entry, &categories).map_err(invalid)?;

        if !seen_ids.insert(archetype.id.to_lowercase()) {
            return Err(invalid(format!("duplicate id '{}'", archetype.id)));
        }
        archetypes.push(archetype);
    }

    let defaults = archetypes.iter().filter(|a| a.is_default).count();
    if defaults > 1 {
        let index = archetypes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_default)
            .nth(1)
            .map(|(i, _)| i)
            .unwrap_or_default();
        return Err(CatalogError::InvalidCatalogEntry {
            index,
            reason: format!("{} archetypes flagged as default, at most one allowed", defaults),
        });
    }

    if archetypes.is_empty() {
        tracing::warn!("Catalog v{} contains no archetypes; matching will fail", raw.version);
    }

    archetypes.sort_by_key(|a| a.priority);

    tracing::info!(
        "Loaded catalog v{} ({} archetypes, {} trait categories)",
        raw.version,
        archetypes.len(),
        raw.vocabulary.len()
    );

    Ok(Catalog {
        version: raw.version,
        vocabulary: raw.vocabulary,
        archetypes,
    })
}

fn validate_entry(
    raw: RawArchetype,
    categories: &BTreeSet<String>,
) -> Result<Archetype, String> {
    let id = required_text(raw.id, "id")?;
    let name = required_text(raw.name, "name")?;

    let traits = match raw.traits {
        Some(traits) if !traits.is_empty() => traits,
        Some(_) => return Err(format!("'{}' has no traits", id)),
        None => return Err(format!("'{}' is missing required field 'traits'", id)),
    };
    let ideal_trip = raw
        .ideal_trip
        .ok_or_else(|| format!("'{}' is missing required field 'idealTrip'", id))?;

    let declared: BTreeSet<String> = traits.iter().map(|c| c.category.to_lowercase()).collect();
    if &declared != categories {
        return Err(format!(
            "'{}' trait categories {:?} do not match the vocabulary {:?}",
            id, declared, categories
        ));
    }

    let days = ideal_trip.duration_days;
    if days.min == 0 || days.min > days.ideal || days.ideal > days.max {
        return Err(format!(
            "'{}' duration must satisfy 1 <= min <= ideal <= max (got {}/{}/{})",
            id, days.min, days.ideal, days.max
        ));
    }

    let range = ideal_trip.budget.daily_range;
    if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
        return Err(format!(
            "'{}' daily budget range is invalid ({} - {})",
            id, range.min, range.max
        ));
    }

    let mut archetype = Archetype {
        id,
        name,
        description: raw.description,
        priority: raw.priority,
        is_default: raw.is_default,
        triggers: raw.triggers,
        traits,
        recommended_destinations: raw.recommended_destinations,
        ideal_trip,
        compatible_archetypes: raw.compatible_archetypes,
    };
    normalize_scores(&mut archetype);
    Ok(archetype)
}

/// Clamp every catalog score into 0-1 and sort each scored list
fn normalize_scores(archetype: &mut Archetype) {
    let mut clamped = 0usize;
    let mut clamp = |score: &mut f64| {
        let unit = clamp_unit(*score);
        if unit != *score {
            clamped += 1;
        }
        *score = unit;
    };

    for category in &mut archetype.traits {
        category.items.iter_mut().for_each(|i| clamp(&mut i.score));
        sort_trait_items(&mut category.items);
    }
    archetype
        .recommended_destinations
        .iter_mut()
        .for_each(|d| clamp(&mut d.score));
    archetype
        .compatible_archetypes
        .iter_mut()
        .for_each(|c| clamp(&mut c.score));

    archetype
        .recommended_destinations
        .sort_by(|a, b| compare_ranked(&a.name, a.score, &b.name, b.score));
    archetype
        .compatible_archetypes
        .sort_by(|a, b| compare_ranked(&a.archetype_name, a.score, &b.archetype_name, b.score));

    if clamped > 0 {
        tracing::warn!("Clamped {} out-of-range scores in '{}'", clamped, archetype.id);
    }
}

fn required_text(value: Option<String>, field: &str) -> Result<String, String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        Some(_) => Err(format!("field '{}' is empty", field)),
        None => Err(format!("missing required field '{}'", field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn seed() -> Value {
        serde_json::from_str(BUILTIN_CATALOG).unwrap()
    }

    fn parse(value: &Value) -> Result<Catalog, CatalogError> {
        parse_catalog(&value.to_string())
    }

    fn assert_invalid_entry(result: Result<Catalog, CatalogError>, expected_index: usize) {
        match result {
            Err(CatalogError::InvalidCatalogEntry { index, .. }) => assert_eq!(index, expected_index),
            other => panic!("expected InvalidCatalogEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_catalog_loads_in_priority_order() {
        let catalog = builtin_catalog().unwrap();
        let ids: Vec<&str> = catalog.archetypes.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["adventure-seeker", "luxury-traveler", "cultural-explorer"]);
        assert_eq!(catalog.vocabulary.len(), 3);
        assert!(catalog.get("CULTURAL-EXPLORER").is_some());
    }

    #[test]
    fn test_rejects_missing_required_fields() {
        for field in ["id", "name", "traits", "idealTrip"] {
            let mut catalog = seed();
            catalog["archetypes"][1].as_object_mut().unwrap().remove(field);
            assert_invalid_entry(parse(&catalog), 1);
        }
    }

    #[test]
    fn test_rejects_blank_id() {
        let mut catalog = seed();
        catalog["archetypes"][0]["id"] = json!("   ");
        assert_invalid_entry(parse(&catalog), 0);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut catalog = seed();
        catalog["archetypes"][2]["id"] = json!("Adventure-Seeker");
        assert_invalid_entry(parse(&catalog), 2);
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let mut catalog = seed();
        catalog["version"] = json!(2);
        assert!(matches!(
            parse(&catalog),
            Err(CatalogError::UnsupportedVersion { found: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_rejects_inverted_duration() {
        let mut catalog = seed();
        catalog["archetypes"][0]["idealTrip"]["durationDays"] = json!({ "min": 10, "max": 5, "ideal": 7 });
        assert_invalid_entry(parse(&catalog), 0);
    }

    #[test]
    fn test_rejects_category_mismatch() {
        let mut catalog = seed();
        catalog["archetypes"][0]["traits"]
            .as_array_mut()
            .unwrap()
            .pop();
        assert_invalid_entry(parse(&catalog), 0);
    }

    #[test]
    fn test_rejects_second_default() {
        let mut catalog = seed();
        catalog["archetypes"][0]["isDefault"] = json!(true);
        assert!(matches!(parse(&catalog), Err(CatalogError::InvalidCatalogEntry { .. })));
    }

    #[test]
    fn test_rejects_bad_pace_value() {
        let mut catalog = seed();
        catalog["archetypes"][0]["idealTrip"]["pace"] = json!("frantic");
        assert_invalid_entry(parse(&catalog), 0);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped_and_sorted() {
        let mut catalog = seed();
        let destinations = catalog["archetypes"][0]["recommendedDestinations"]
            .as_array_mut()
            .unwrap();
        let last = destinations.len() - 1;
        destinations[0]["score"] = json!(-0.4);
        destinations[last]["score"] = json!(1.7);
        let compatible = &mut catalog["archetypes"][0]["compatibleArchetypes"][0]["score"];
        *compatible = json!(3.0);

        let loaded = parse(&catalog).unwrap();
        let archetype = loaded
            .get(catalog["archetypes"][0]["id"].as_str().unwrap())
            .unwrap();

        let scores: Vec<f64> = archetype
            .recommended_destinations
            .iter()
            .map(|d| d.score)
            .collect();
        assert_eq!(scores.first(), Some(&1.0));
        assert_eq!(scores.last(), Some(&0.0));
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(archetype.compatible_archetypes[0].score, 1.0);
    }

    #[test]
    fn test_empty_archetype_list_loads() {
        let mut catalog = seed();
        catalog["archetypes"] = json!([]);
        assert!(parse(&catalog).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            load_catalog("does/not/exist.json"),
            Err(CatalogError::Io { .. })
        ));
    }
}
