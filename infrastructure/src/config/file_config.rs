//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use deckweaver_application::DeckBuildConfig;
use deckweaver_domain::{
    DECK_SIZE, DEFAULT_SIMILARITY_THRESHOLD, EligibilityRules, OutputFormat, SimilarityWeights,
    TypeQuotas,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export OutputFormat from domain for convenience
pub use deckweaver_domain::OutputFormat as FileOutputFormat;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("catalog path cannot be empty")]
    EmptyCatalogPath,

    #[error("invalid deck settings: {0}")]
    InvalidDeck(String),
}

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// Path to the card catalog JSON file
    pub path: String,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            path: "cards.json".to_string(),
        }
    }
}

/// Raw deck configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDeckConfig {
    /// Minimum similarity (exclusive) for a graph edge
    pub similarity_threshold: f64,
    /// Cards beside the commander
    pub deck_size: usize,
    /// Non-creature cards skip the tribal check
    pub exempt_non_creatures: bool,
    /// Apply the `[quotas]` caps during selection
    pub type_quotas: bool,
}

impl Default for FileDeckConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            deck_size: DECK_SIZE,
            exempt_non_creatures: true,
            type_quotas: false,
        }
    }
}

/// Raw similarity weight configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWeightsConfig {
    pub text: f64,
    #[serde(rename = "type")]
    pub type_: f64,
    pub color: f64,
}

impl Default for FileWeightsConfig {
    fn default() -> Self {
        let defaults = SimilarityWeights::default();
        Self {
            text: defaults.text_weight,
            type_: defaults.type_weight,
            color: defaults.color_weight,
        }
    }
}

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Timeout in seconds for a whole deck-building run
    pub timeout_seconds: Option<u64>,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format (uses domain type)
    pub format: Option<OutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Catalog source
    pub catalog: FileCatalogConfig,
    /// Deck settings
    pub deck: FileDeckConfig,
    /// Similarity weights
    pub weights: FileWeightsConfig,
    /// Per-type caps (enforced when `deck.type_quotas` is set)
    pub quotas: TypeQuotas,
    /// Behavior settings
    pub behavior: FileBehaviorConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Convert into the application-level deck configuration
    pub fn to_deck_config(&self) -> DeckBuildConfig {
        let mut config = DeckBuildConfig::default()
            .with_threshold(self.deck.similarity_threshold)
            .with_deck_size(self.deck.deck_size)
            .with_weights(SimilarityWeights::new(
                self.weights.text,
                self.weights.type_,
                self.weights.color,
            ))
            .with_eligibility(EligibilityRules {
                exempt_non_creatures: self.deck.exempt_non_creatures,
            });
        config.type_quotas = self.quotas;
        config.enforce_type_quotas = self.deck.type_quotas;
        config
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Timeout of 0 seconds doesn't make sense
        if let Some(0) = self.behavior.timeout_seconds {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.catalog.path.trim().is_empty() {
            return Err(ConfigValidationError::EmptyCatalogPath);
        }

        self.to_deck_config()
            .validate()
            .map_err(|e| ConfigValidationError::InvalidDeck(e.to_string()))
    }
}
