use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::catalog::ReferenceCatalog;
use crate::errors::{CoachError, Result};
use crate::models::keypoint::MIN_CONFIDENCE;
use crate::services::optimal_mechanics_service::DEFAULT_TOP_N;
use crate::services::similarity_service::DEFAULT_MATCH_LIMIT;

/// Analysis pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub min_confidence: f64,
    pub match_limit: usize,
    pub top_n: usize,
    /// Fixed cue seed; `None` draws cues from entropy
    pub cue_seed: Option<u64>,
    /// External catalog file; `None` uses the built-in catalog
    pub catalog_path: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_confidence: MIN_CONFIDENCE,
            match_limit: DEFAULT_MATCH_LIMIT,
            top_n: DEFAULT_TOP_N,
            cue_seed: None,
            catalog_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Read configuration from `SHOT_COACH_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, defaulting unset keys
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            min_confidence: parse_or(&lookup, "SHOT_COACH_MIN_CONFIDENCE", defaults.min_confidence)?,
            match_limit: parse_or(&lookup, "SHOT_COACH_MATCH_LIMIT", defaults.match_limit)?,
            top_n: parse_or(&lookup, "SHOT_COACH_TOP_N", defaults.top_n)?,
            cue_seed: lookup("SHOT_COACH_CUE_SEED")
                .map(|value| parse_value("SHOT_COACH_CUE_SEED", &value))
                .transpose()?,
            catalog_path: lookup("SHOT_COACH_CATALOG")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(CoachError::InvalidConfig(format!(
                "min confidence must be between 0 and 1, got {}",
                self.min_confidence
            )));
        }
        if self.match_limit == 0 {
            return Err(CoachError::InvalidConfig("match limit must be at least 1".to_string()));
        }
        if self.top_n == 0 {
            return Err(CoachError::InvalidConfig("top N must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn with_match_limit(mut self, match_limit: usize) -> Self {
        self.match_limit = match_limit;
        self
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_cue_seed(mut self, seed: u64) -> Self {
        self.cue_seed = Some(seed);
        self
    }

    /// The configured catalog file, or a copy of the built-in catalog
    pub fn load_catalog(&self) -> Result<ReferenceCatalog> {
        match &self.catalog_path {
            Some(path) => ReferenceCatalog::from_json_file(path),
            None => Ok(ReferenceCatalog::builtin().clone()),
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| CoachError::InvalidConfig(format!("{key}={value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.min_confidence, 0.3);
        assert_eq!(config.match_limit, 5);
        assert_eq!(config.top_n, 3);
        assert_eq!(config.cue_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = AnalysisConfig::from_lookup(lookup_from(&[
            ("SHOT_COACH_MIN_CONFIDENCE", "0.5"),
            ("SHOT_COACH_MATCH_LIMIT", "8"),
            ("SHOT_COACH_TOP_N", "4"),
            ("SHOT_COACH_CUE_SEED", "42"),
            ("SHOT_COACH_CATALOG", "/tmp/catalog.json"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.min_confidence, 0.5);
        assert_eq!(config.match_limit, 8);
        assert_eq!(config.top_n, 4);
        assert_eq!(config.cue_seed, Some(42));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_unparseable_number() {
        let result = AnalysisConfig::from_lookup(lookup_from(&[("SHOT_COACH_MATCH_LIMIT", "five")]));
        assert_matches!(result, Err(CoachError::InvalidConfig(msg)) if msg.contains("SHOT_COACH_MATCH_LIMIT"));
    }

    #[test]
    fn test_out_of_range_values() {
        let result = AnalysisConfig::from_lookup(lookup_from(&[("SHOT_COACH_MIN_CONFIDENCE", "1.5")]));
        assert_matches!(result, Err(CoachError::InvalidConfig(_)));

        let result = AnalysisConfig::from_lookup(lookup_from(&[("SHOT_COACH_TOP_N", "0")]));
        assert_matches!(result, Err(CoachError::InvalidConfig(_)));
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = AnalysisConfig::default().load_catalog().unwrap();
        assert_eq!(catalog.version(), ReferenceCatalog::builtin().version());
    }
}
