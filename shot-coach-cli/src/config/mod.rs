use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use shot_coach::config::AnalysisConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSection,

    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSection {
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,

    #[serde(default = "default_match_limit")]
    pub match_limit: usize,

    #[serde(default = "default_top_n")]
    pub top_n: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cue_seed: Option<u64>,

    /// JSON reference catalog replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub pretty: bool,

    #[serde(default = "default_true")]
    pub color: bool,
}

// Default value functions
fn default_min_confidence() -> f64 {
    0.3
}

fn default_match_limit() -> usize {
    5
}

fn default_top_n() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
            match_limit: default_match_limit(),
            top_n: default_top_n(),
            cue_seed: None,
            catalog: None,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            pretty: false,
            color: default_true(),
        }
    }
}

impl AnalysisSection {
    /// File value for an analysis environment key
    fn lookup(&self, key: &str) -> Option<String> {
        match key {
            "SHOT_COACH_MIN_CONFIDENCE" => Some(self.min_confidence.to_string()),
            "SHOT_COACH_MATCH_LIMIT" => Some(self.match_limit.to_string()),
            "SHOT_COACH_TOP_N" => Some(self.top_n.to_string()),
            "SHOT_COACH_CUE_SEED" => self.cue_seed.map(|seed| seed.to_string()),
            "SHOT_COACH_CATALOG" => self.catalog.as_ref().map(|p| p.display().to_string()),
            _ => None,
        }
    }
}

impl Config {
    /// Get config directory path (~/.shot-coach/)
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".shot-coach"))
    }

    /// Get config file path (~/.shot-coach/config.toml)
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default location
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_file(),
        }
    }

    /// Load configuration from file
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_file = Self::resolve_path(path)?;

        if !config_file.exists() {
            tracing::debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_file).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let config_file = Self::resolve_path(path)?;
        if let Some(config_dir) = config_file.parent() {
            fs::create_dir_all(config_dir).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_file, contents).context("Failed to write config file")?;

        Ok(config_file)
    }

    /// Analysis settings: `SHOT_COACH_*` environment variables win over the file
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let section = &self.analysis;
        AnalysisConfig::from_lookup(|key| std::env::var(key).ok().or_else(|| section.lookup(key)))
            .context("Invalid analysis configuration")
    }
}
