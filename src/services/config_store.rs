// Configuration Storage Service
// Engine weights/constants, validation, and config file read/write with backups

use super::errors::ConfigError;
use crate::models::Confidence;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Fusion weights. They must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FusionWeights {
    pub vocabulary_richness: f64,
    pub naturalness: f64,
    pub coherence: f64,
    pub structure: f64,
    pub perplexity: f64,
    pub format_consistency: f64,
}

impl Default for FusionWeights {
    fn default() -> Self {
        Self {
            vocabulary_richness: 0.20,
            naturalness: 0.25,
            coherence: 0.15,
            structure: 0.15,
            perplexity: 0.15,
            format_consistency: 0.10,
        }
    }
}

impl FusionWeights {
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.vocabulary_richness,
            self.naturalness,
            self.coherence,
            self.structure,
            self.perplexity,
            self.format_consistency,
        ]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// Word-count cut-offs for the confidence label. `high_words` must exceed `medium_words`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfidenceThresholds {
    pub high_words: usize,
    pub medium_words: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high_words: 200,
            medium_words: 100,
        }
    }
}

impl ConfidenceThresholds {
    pub fn label(&self, word_count: usize) -> Confidence {
        if word_count > self.high_words {
            Confidence::High
        } else if word_count > self.medium_words {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub weights: FusionWeights,
    pub naturalness_scale: f64,
    pub perplexity_scale: f64,
    /// Segment score delta (percentage points) that must be exceeded to flag a transition.
    pub transition_threshold: u32,
    pub confidence: ConfidenceThresholds,
    pub min_chars: usize,
    pub max_words: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: FusionWeights::default(),
            naturalness_scale: 200.0,
            perplexity_scale: 15.0,
            transition_threshold: 20,
            confidence: ConfidenceThresholds::default(),
            min_chars: 50,
            max_words: 2500,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = self.weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Invalid("weights must be finite and non-negative".to_string()));
        }
        let total = self.weights.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid(format!("weights sum to {:.4}, expected 1.0", total)));
        }
        if !(self.naturalness_scale > 0.0 && self.naturalness_scale.is_finite()) {
            return Err(ConfigError::Invalid("naturalnessScale must be positive".to_string()));
        }
        if !(self.perplexity_scale > 0.0 && self.perplexity_scale.is_finite()) {
            return Err(ConfigError::Invalid("perplexityScale must be positive".to_string()));
        }
        if self.transition_threshold > 100 {
            return Err(ConfigError::Invalid("transitionThreshold must be at most 100".to_string()));
        }
        if self.confidence.high_words <= self.confidence.medium_words {
            return Err(ConfigError::Invalid(
                "confidence.highWords must be greater than confidence.mediumWords".to_string(),
            ));
        }
        if self.max_words == 0 {
            return Err(ConfigError::Invalid("maxWords must be positive".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("textprobe"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Load configuration; a missing file yields defaults.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        if !self.config_file.exists() {
            debug!(path = %self.config_file.display(), "config.missing_using_defaults");
            return Ok(EngineConfig::default());
        }
        EngineConfig::from_file(&self.config_file)
    }

    /// Validate and save configuration, backing up any existing file first.
    pub fn save(&self, config: &EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        fs::create_dir_all(&self.config_dir)?;

        if self.config_file.exists() {
            self.create_backup()?;
        }

        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_file, content)?;
        info!(path = %self.config_file.display(), "config.saved");
        Ok(())
    }

    fn create_backup(&self) -> Result<(), ConfigError> {
        let backup_dir = self.config_dir.join("backups");
        fs::create_dir_all(&backup_dir)?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S%3f");
        let backup_file = backup_dir.join(format!("config_{}.json", timestamp));
        fs::copy(&self.config_file, &backup_file)?;

        // Keep only last 10 backups
        self.cleanup_old_backups(&backup_dir, 10)
    }

    fn cleanup_old_backups(&self, backup_dir: &Path, keep: usize) -> Result<(), ConfigError> {
        let mut entries: Vec<_> = fs::read_dir(backup_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
            .collect();

        if entries.len() <= keep {
            return Ok(());
        }

        // Oldest first; names embed the timestamp.
        entries.sort_by_key(|e| e.file_name());

        for entry in entries.iter().take(entries.len() - keep) {
            let _ = fs::remove_file(entry.path());
        }

        Ok(())
    }
}
