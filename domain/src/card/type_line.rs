//! Type line parsing
//!
//! A type line such as `"Legendary Creature — Elf Druid"` splits at the em
//! dash into supertypes and card types on the left and subtypes on the right.
//! A spaced ASCII hyphen (`" - "`) is accepted as a separator as well.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Card types that can appear on the left side of a type line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Creature,
    Planeswalker,
    Battle,
    Artifact,
    Enchantment,
    Instant,
    Sorcery,
    Land,
    Kindred,
}

impl CardType {
    /// Priority order used to pick a card's primary type
    pub const PRIORITY: [CardType; 8] = [
        CardType::Creature,
        CardType::Planeswalker,
        CardType::Battle,
        CardType::Artifact,
        CardType::Enchantment,
        CardType::Instant,
        CardType::Sorcery,
        CardType::Land,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            CardType::Creature => "creature",
            CardType::Planeswalker => "planeswalker",
            CardType::Battle => "battle",
            CardType::Artifact => "artifact",
            CardType::Enchantment => "enchantment",
            CardType::Instant => "instant",
            CardType::Sorcery => "sorcery",
            CardType::Land => "land",
            CardType::Kindred => "kindred",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word.to_lowercase().as_str() {
            "creature" => Some(CardType::Creature),
            "planeswalker" => Some(CardType::Planeswalker),
            "battle" => Some(CardType::Battle),
            "artifact" => Some(CardType::Artifact),
            "enchantment" => Some(CardType::Enchantment),
            "instant" => Some(CardType::Instant),
            "sorcery" => Some(CardType::Sorcery),
            "land" => Some(CardType::Land),
            "kindred" | "tribal" => Some(CardType::Kindred),
            _ => None,
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parsed type line (Value Object)
///
/// Keeps the raw text for display and substring matching; the parsed parts
/// are lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct TypeLine {
    raw: String,
    supertypes: Vec<String>,
    card_types: Vec<CardType>,
    subtypes: Vec<String>,
}

impl TypeLine {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let (left, right) = split_type_line(&raw);

        let mut supertypes = Vec::new();
        let mut card_types = Vec::new();
        for word in left.split_whitespace() {
            match CardType::from_word(word) {
                Some(card_type) => {
                    if !card_types.contains(&card_type) {
                        card_types.push(card_type);
                    }
                }
                None => supertypes.push(word.to_lowercase()),
            }
        }

        let subtypes = right
            .map(|r| r.split_whitespace().map(str::to_lowercase).collect())
            .unwrap_or_default();

        Self {
            raw,
            supertypes,
            card_types,
            subtypes,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn card_types(&self) -> &[CardType] {
        &self.card_types
    }

    pub fn subtypes(&self) -> &[String] {
        &self.subtypes
    }

    pub fn has_type(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    pub fn has_supertype(&self, supertype: &str) -> bool {
        self.supertypes
            .iter()
            .any(|s| s.eq_ignore_ascii_case(supertype))
    }

    pub fn is_creature(&self) -> bool {
        self.has_type(CardType::Creature)
    }

    pub fn is_land(&self) -> bool {
        self.has_type(CardType::Land)
    }

    pub fn is_basic_land(&self) -> bool {
        self.is_land() && self.has_supertype("basic")
    }

    /// First type of [`CardType::PRIORITY`] present on this line
    pub fn primary_type(&self) -> Option<CardType> {
        CardType::PRIORITY
            .into_iter()
            .find(|t| self.card_types.contains(t))
    }

    /// Case-insensitive substring test against the raw text
    pub fn contains(&self, needle: &str) -> bool {
        self.raw.to_lowercase().contains(&needle.to_lowercase())
    }

    /// All lowercase words of the line (supertypes, types, subtypes)
    pub fn tokens(&self) -> BTreeSet<String> {
        self.supertypes
            .iter()
            .cloned()
            .chain(self.card_types.iter().map(|t| t.as_str().to_string()))
            .chain(self.subtypes.iter().cloned())
            .collect()
    }
}

fn split_type_line(raw: &str) -> (&str, Option<&str>) {
    if let Some((left, right)) = raw.split_once('—') {
        return (left, Some(right));
    }
    if let Some((left, right)) = raw.split_once(" - ") {
        return (left, Some(right));
    }
    (raw, None)
}

impl std::fmt::Display for TypeLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<String> for TypeLine {
    fn from(raw: String) -> Self {
        TypeLine::parse(raw)
    }
}

impl From<&str> for TypeLine {
    fn from(raw: &str) -> Self {
        TypeLine::parse(raw)
    }
}

impl From<TypeLine> for String {
    fn from(line: TypeLine) -> Self {
        line.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_creature_with_subtypes() {
        let line = TypeLine::parse("Legendary Creature — Elf Druid");
        assert_eq!(line.supertypes(), &["legendary".to_string()]);
        assert_eq!(line.card_types(), &[CardType::Creature]);
        assert_eq!(line.subtypes(), &["elf".to_string(), "druid".to_string()]);
        assert!(line.is_creature());
        assert_eq!(line.primary_type(), Some(CardType::Creature));
    }

    #[test]
    fn test_parse_ascii_separator() {
        let line = TypeLine::parse("Creature - Goblin Warrior");
        assert_eq!(line.subtypes(), &["goblin".to_string(), "warrior".to_string()]);
    }

    #[test]
    fn test_parse_without_subtypes() {
        let line = TypeLine::parse("Instant");
        assert!(line.subtypes().is_empty());
        assert_eq!(line.primary_type(), Some(CardType::Instant));
    }

    #[test]
    fn test_basic_land() {
        let line = TypeLine::parse("Basic Land — Forest");
        assert!(line.is_basic_land());
        assert!(!TypeLine::parse("Land").is_basic_land());
    }

    #[test]
    fn test_primary_type_prefers_creature() {
        let line = TypeLine::parse("Artifact Creature — Golem");
        assert_eq!(line.primary_type(), Some(CardType::Creature));

        let line = TypeLine::parse("Kindred Enchantment — Elf");
        assert_eq!(line.primary_type(), Some(CardType::Enchantment));
        assert!(line.has_type(CardType::Kindred));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let line = TypeLine::parse("Creature — Vampire Knight");
        assert!(line.contains("vampire"));
        assert!(line.contains("VAMPIRE"));
        assert!(!line.contains("zombie"));
    }

    #[test]
    fn test_tokens() {
        let tokens = TypeLine::parse("Legendary Creature — Elf Druid").tokens();
        let expected: BTreeSet<String> = ["legendary", "creature", "elf", "druid"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(tokens, expected);
    }
}
