use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

const MAX_TAG_LEN: usize = 64;

/// Request carrying the caller's preference tags
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TagsRequest {
    #[serde(default)]
    #[validate(length(max = 64), custom(function = "validate_tag_lengths"))]
    pub tags: Vec<String>,
}

/// Request to combine two catalog archetypes
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HybridRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "firstId", rename = "first")]
    pub first: String,
    #[validate(length(min = 1))]
    #[serde(alias = "secondId", rename = "second")]
    pub second: String,
}

#[allow(clippy::ptr_arg)]
fn validate_tag_lengths(tags: &Vec<String>) -> Result<(), ValidationError> {
    if tags.iter().any(|t| t.chars().count() > MAX_TAG_LEN) {
        return Err(ValidationError::new("tag_too_long"));
    }
    Ok(())
}
