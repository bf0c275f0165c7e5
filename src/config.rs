//! Configuration management for the matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub keywords: KeywordConfig,
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub skills: SkillConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Tokens must be strictly longer than this many characters
    pub min_token_len: usize,
    pub extra_stop_words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub sublinear_tf: bool,
    pub smooth_idf: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub strong_match_threshold: f32,
    pub min_match_score: f32,
    pub fuzzy_threshold: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Alias -> canonical skill, merged over the built-in table
    pub aliases: BTreeMap<String, String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            min_token_len: 3,
            extra_stop_words: Vec::new(),
        }
    }
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            sublinear_tf: false,
            smooth_idf: true,
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strong_match_threshold: 0.6,
            min_match_score: 0.3,
            fuzzy_threshold: 0.9,
        }
    }
}

impl Config {
    /// Load from the user config directory, writing defaults on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            MatcherError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        for (name, value) in [
            ("scoring.strong_match_threshold", scoring.strong_match_threshold),
            ("scoring.min_match_score", scoring.min_match_score),
            ("scoring.fuzzy_threshold", scoring.fuzzy_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatcherError::Configuration(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("recruit-matcher")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::default();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[vectorizer]\nsublinear_tf = true\n\n[skills.aliases]\nrustlang = \"rust\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.vectorizer.sublinear_tf);
        assert!(loaded.vectorizer.smooth_idf);
        assert_eq!(loaded.keywords.min_token_len, 3);
        assert_eq!(loaded.scoring, ScoringConfig::default());
        assert_eq!(loaded.skills.aliases.get("rustlang").map(String::as_str), Some("rust"));
    }

    #[test]
    fn test_out_of_range_threshold_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scoring]\nmin_match_score = 1.5\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, MatcherError::Configuration(_)));
    }
}
