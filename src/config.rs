//! Configuration management for the placement matcher

use crate::error::{PlacementError, Result};
use crate::matching::extractor::MatchMode;
use crate::matching::ranking::{RankingConfig, DEFAULT_MIN_SCORE};
use crate::matching::taxonomy::DEFAULT_FIELD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// PDF uploads above this size are rejected.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub matching: MatchingConfig,
    pub ranking: RankingSettings,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Taxonomy used when the selected field has none
    pub default_field: String,
    /// Field analysed when `--field` is not given
    pub selected_field: String,
    pub match_mode: MatchMode,
    pub include_related_fields: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingSettings {
    pub min_score: u8,
    pub restrict_to_field: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_file_size_bytes: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            default_field: DEFAULT_FIELD.to_string(),
            selected_field: DEFAULT_FIELD.to_string(),
            match_mode: MatchMode::WholeWord,
            include_related_fields: true,
            taxonomy_path: None,
        }
    }
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            restrict_to_field: true,
            catalog_path: None,
        }
    }
}

impl RankingSettings {
    pub fn to_ranking_config(&self) -> RankingConfig {
        RankingConfig {
            min_score: self.min_score,
            restrict_to_field: self.restrict_to_field,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            ranking: RankingSettings::default(),
            input: InputConfig {
                max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
                enable_cache: true,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| PlacementError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| PlacementError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("placement-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.ranking.min_score > 100 {
            return Err(PlacementError::Configuration(format!(
                "ranking.min_score must be between 0 and 100, got {}",
                self.ranking.min_score
            )));
        }
        if self.input.max_file_size_bytes == 0 {
            return Err(PlacementError::Configuration(
                "input.max_file_size_bytes must be greater than zero".to_string(),
            ));
        }
        if self.matching.default_field.trim().is_empty() {
            return Err(PlacementError::Configuration(
                "matching.default_field must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_observed_constants() {
        let config = Config::default();
        assert_eq!(config.ranking.min_score, 30);
        assert_eq!(config.input.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.matching.default_field, "Software Development");
        assert_eq!(config.matching.match_mode, MatchMode::WholeWord);
        assert!(config.matching.include_related_fields);
    }

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_round_trip_with_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ranking.min_score = 50;
        config.matching.match_mode = MatchMode::Substring;
        config.matching.taxonomy_path = Some(dir.path().join("taxonomy.json"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_min_score_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.ranking.min_score = 150;
        config.save_to(&path).unwrap();

        assert!(matches!(Config::load_from(&path), Err(PlacementError::Configuration(_))));
    }
}
