//! Card entities

use super::color::{Color, ColorSet};
use super::type_line::TypeLine;
use serde::{Deserialize, Serialize};

/// Unique card identifier
///
/// Ordered lexicographically; this order is the deterministic tie-break
/// wherever cards are ranked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        CardId::new(s)
    }
}

impl From<String> for CardId {
    fn from(s: String) -> Self {
        CardId(s)
    }
}

/// A card record (Entity)
///
/// Cards are read-only once they enter a catalog; the builder methods
/// exist for adapters and tests that construct them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub colors: ColorSet,
    /// Explicit color identity; falls back to `colors` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_identity: Option<ColorSet>,
    pub type_line: TypeLine,
    #[serde(default)]
    pub cmc: f64,
    /// Rules text, empty for vanilla cards
    #[serde(default)]
    pub text: String,
    /// Kept verbatim: variable stats such as `*` or `1+*` are legal values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toughness: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty: Option<String>,
}

impl Card {
    pub fn new(
        id: impl Into<CardId>,
        name: impl Into<String>,
        type_line: impl Into<TypeLine>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            colors: ColorSet::colorless(),
            color_identity: None,
            type_line: type_line.into(),
            cmc: 0.0,
            text: String::new(),
            power: None,
            toughness: None,
            loyalty: None,
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_colors(mut self, colors: ColorSet) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_color_identity(mut self, identity: ColorSet) -> Self {
        self.color_identity = Some(identity);
        self
    }

    pub fn with_cmc(mut self, cmc: f64) -> Self {
        self.cmc = cmc;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_stats(mut self, power: impl Into<String>, toughness: impl Into<String>) -> Self {
        self.power = Some(power.into());
        self.toughness = Some(toughness.into());
        self
    }

    pub fn with_loyalty(mut self, loyalty: impl Into<String>) -> Self {
        self.loyalty = Some(loyalty.into());
        self
    }

    // ==================== Queries ====================

    /// Colors this card requires in a deck: the explicit identity, or its colors
    pub fn color_identity(&self) -> ColorSet {
        self.color_identity.unwrap_or(self.colors)
    }

    pub fn is_creature(&self) -> bool {
        self.type_line.is_creature()
    }

    /// Basic land by supertype, or by one of the five basic land names
    pub fn is_basic_land(&self) -> bool {
        self.type_line.is_basic_land()
            || Color::ALL
                .iter()
                .any(|c| c.basic_land().eq_ignore_ascii_case(self.name.trim()))
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Check the record invariants a catalog relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err(format!("card '{}' has an empty id", self.name));
        }
        if self.name.trim().is_empty() {
            return Err(format!("card {} has an empty name", self.id));
        }
        if !self.cmc.is_finite() || self.cmc < 0.0 {
            return Err(format!("card '{}' has invalid cmc {}", self.name, self.cmc));
        }
        Ok(())
    }
}
