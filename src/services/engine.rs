use std::sync::Arc;
use crate::core::{hybridize, recommend, EngineError, Matcher, ProfileBuilder};
use crate::core::profile::normalize_tags;
use crate::models::{Catalog, Hybrid, MatchResult, Profile, RecommendationSet};
use crate::services::cache::{CacheKey, CacheStats, MatchCache};

/// Entry point shared by the style matcher and trip DNA flows.
///
/// Scoring is synchronous and pure; the async methods are the boundary a
/// remote backend can later sit behind without callers changing.
#[derive(Clone)]
pub struct StyleEngine {
    catalog: Arc<Catalog>,
    matcher: Matcher,
    cache: Option<Arc<MatchCache>>,
}

impl StyleEngine {
    pub fn new(catalog: Arc<Catalog>, matcher: Matcher) -> Self {
        Self {
            catalog,
            matcher,
            cache: None,
        }
    }

    /// Attach a match cache
    pub fn with_cache(mut self, cache: Arc<MatchCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(|c| c.stats())
    }

    pub fn build_profile<I, S>(&self, tags: I) -> Profile
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ProfileBuilder::new(&self.catalog.vocabulary).build_profile(tags)
    }

    /// Build a profile and match it, synchronously and without the cache
    pub fn match_profile(&self, profile: &Profile) -> Result<MatchResult, EngineError> {
        self.matcher.find_match(profile, &self.catalog.archetypes)
    }

    /// Match free-text tags against the catalog
    pub async fn match_tags<I, S>(&self, tags: I) -> Result<MatchResult, EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = normalize_tags(tags);
        let key = CacheKey::match_result(&tags);

        if let Some(cache) = &self.cache {
            if let Some(result) = cache.get(&key).await {
                return Ok(result);
            }
        }

        let profile = self.build_profile(&tags);
        let result = self.match_profile(&profile)?;

        if let Some(cache) = &self.cache {
            cache.insert(key, result.clone()).await;
        }

        Ok(result)
    }

    /// Match tags and project the result into recommendations
    pub async fn recommend_tags<I, S>(
        &self,
        tags: I,
    ) -> Result<(MatchResult, RecommendationSet), EngineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let result = self.match_tags(tags).await?;
        let recommendations = recommend(&result);
        Ok((result, recommendations))
    }

    /// Hybridize two catalog archetypes by id
    pub fn hybridize_ids(&self, first: &str, second: &str) -> Result<Hybrid, EngineError> {
        let lookup = |id: &str| {
            self.catalog
                .get(id.trim())
                .ok_or_else(|| EngineError::UnknownArchetype { id: id.to_string() })
        };
        let a = lookup(first)?;
        let b = lookup(second)?;
        hybridize(a, b)
    }
}
