use serde::{Deserialize, Serialize};
use crate::models::domain::Archetype;

/// Catalog schema version this build understands
pub const CATALOG_VERSION: u32 = 1;

/// A known trait and its "not selected but not excluded" score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitDefinition {
    pub name: String,
    pub baseline: f64,
    /// Alternative spellings that also select this trait
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

/// Every known trait of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraitVocabulary {
    pub category: String,
    pub traits: Vec<TraitDefinition>,
}

/// Validated, read-only archetype catalog
///
/// Archetypes are stored in evaluation order (ascending priority, catalog
/// order for equal priorities).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    pub version: u32,
    #[serde(rename = "traitVocabulary")]
    pub vocabulary: Vec<TraitVocabulary>,
    pub archetypes: Vec<Archetype>,
}

impl Catalog {
    /// Find an archetype by id, ignoring case
    pub fn get(&self, id: &str) -> Option<&Archetype> {
        self.archetypes.iter().find(|a| a.id.eq_ignore_ascii_case(id))
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }
}
