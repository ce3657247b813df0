//! JSON card catalog adapter
//!
//! Reads an already-downloaded catalog file. Two layouts are accepted:
//!
//! - an array of raw card records, as dumped from the public card API
//! - an object keyed by card name, each value a card record
//!
//! Records that cannot be turned into a valid [`Card`] are skipped with a
//! warning; only a catalog with no usable card at all is an error.

use async_trait::async_trait;
use deckweaver_application::{CardCatalogProvider, CatalogError};
use deckweaver_domain::{Card, CardCatalog, ColorSet};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Number or string, as card APIs mix both for numeric-looking fields
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => n.as_f64(),
            Scalar::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One card record as found in the file
#[derive(Debug, Deserialize)]
struct RawCard {
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default, alias = "multiverseid")]
    multiverse_id: Option<Scalar>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    colors: Option<Vec<String>>,
    #[serde(default, alias = "colorIdentity")]
    color_identity: Option<Vec<String>>,
    #[serde(default, rename = "type", alias = "type_line")]
    type_line: Option<String>,
    #[serde(default)]
    cmc: Option<Scalar>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    power: Option<Scalar>,
    #[serde(default)]
    toughness: Option<Scalar>,
    #[serde(default)]
    loyalty: Option<Scalar>,
}

impl RawCard {
    /// Build a validated card. `key` is the map key for name-keyed catalogs.
    fn into_card(self, key: Option<&str>) -> Result<Card, CatalogError> {
        let name = self
            .name
            .or_else(|| key.map(str::to_string))
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        let invalid = |reason: String| CatalogError::InvalidCard {
            name: if name.is_empty() {
                "<unnamed>".to_string()
            } else {
                name.clone()
            },
            reason,
        };

        if name.is_empty() {
            return Err(invalid("missing name".to_string()));
        }

        let id = self
            .id
            .or(self.multiverse_id)
            .map(Scalar::into_text)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| name.to_lowercase());

        let type_line = self
            .type_line
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| invalid("missing type line".to_string()))?;

        let colors = ColorSet::parse_tokens(self.colors.unwrap_or_default()).map_err(invalid)?;

        let cmc = match self.cmc {
            Some(raw) => raw
                .to_f64()
                .ok_or_else(|| invalid("cmc is not a number".to_string()))?,
            None => 0.0,
        };

        let mut card = Card::new(id, name.clone(), type_line)
            .with_colors(colors)
            .with_cmc(cmc)
            .with_text(self.text.unwrap_or_default());

        if let Some(identity) = self.color_identity {
            card = card.with_color_identity(ColorSet::parse_tokens(identity).map_err(invalid)?);
        }
        card.power = self.power.map(Scalar::into_text);
        card.toughness = self.toughness.map(Scalar::into_text);
        card.loyalty = self.loyalty.map(Scalar::into_text);

        card.validate().map_err(invalid)?;
        Ok(card)
    }
}

/// Parse catalog JSON text. `source` names the input in error messages.
pub fn parse_catalog(content: &str, source: &str) -> Result<CardCatalog, CatalogError> {
    let root: Value =
        serde_json::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let records: Vec<(Option<String>, Value)> = match root {
        Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
        // BTreeMap keeps name-keyed catalogs in a stable order
        Value::Object(map) => map
            .into_iter()
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .map(|(k, v)| (Some(k), v))
            .collect(),
        other => {
            return Err(CatalogError::Parse(format!(
                "expected an array or object of cards, found {}",
                json_kind(&other)
            )));
        }
    };

    let total = records.len();
    let mut catalog = CardCatalog::new();
    let mut skipped = 0usize;

    for (key, value) in records {
        let card = serde_json::from_value::<RawCard>(value)
            .map_err(|e| CatalogError::InvalidCard {
                name: key.clone().unwrap_or_else(|| "<record>".to_string()),
                reason: e.to_string(),
            })
            .and_then(|raw| raw.into_card(key.as_deref()));

        match card {
            Ok(card) => {
                if !catalog.insert(card) {
                    skipped += 1;
                }
            }
            Err(e) => {
                warn!("Skipping catalog record: {}", e);
                skipped += 1;
            }
        }
    }

    debug!("Parsed {} of {} records ({} skipped)", catalog.len(), total, skipped);

    if catalog.is_empty() {
        return Err(CatalogError::Empty(source.to_string()));
    }
    Ok(catalog)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Catalog provider backed by a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonCardCatalog {
    path: PathBuf,
}

impl JsonCardCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CardCatalogProvider for JsonCardCatalog {
    async fn load_catalog(&self) -> Result<CardCatalog, CatalogError> {
        let source_name = self.path.display().to_string();
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: source_name.clone(),
                source,
            })?;

        let catalog = parse_catalog(&content, &source_name)?;
        info!("Loaded {} cards from {}", catalog.len(), source_name);
        Ok(catalog)
    }

    fn source_description(&self) -> String {
        self.path.display().to_string()
    }
}
