//! Eligibility filter
//!
//! A card joins the candidate pool for a commander when:
//!
//! 1. it is not the commander itself,
//! 2. its color identity is a subset of the commander's, and
//! 3. its type line contains the tribal type (case-insensitive substring),
//!    unless the card is tribe-exempt.
//!
//! Basic lands are always tribe-exempt. With
//! [`EligibilityRules::exempt_non_creatures`] (the default) every
//! non-creature card is exempt too, so only creatures have to carry the
//! tribal type.

use crate::card::{Card, CardCatalog, CardId};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tribe-exemption rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRules {
    /// Non-creature cards skip the tribal check
    pub exempt_non_creatures: bool,
}

impl Default for EligibilityRules {
    fn default() -> Self {
        Self {
            exempt_non_creatures: true,
        }
    }
}

impl EligibilityRules {
    /// Only basic lands bypass the tribal check.
    pub fn strict() -> Self {
        Self {
            exempt_non_creatures: false,
        }
    }
}

/// Ordered pool of cards eligible for one commander
#[derive(Debug, Clone, Default)]
pub struct CandidatePool {
    cards: Vec<Card>,
}

impl CandidatePool {
    /// Wrap an already-filtered card list. Later duplicates of an id are dropped.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut pool = Self::default();
        for card in cards {
            if !pool.contains(&card.id) {
                pool.cards.push(card);
            }
        }
        pool
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.iter().any(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Filters a catalog down to a commander's candidate pool
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityFilter {
    rules: EligibilityRules,
}

impl EligibilityFilter {
    pub fn new(rules: EligibilityRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> EligibilityRules {
        self.rules
    }

    /// Whether `card` may skip the tribal check
    pub fn is_tribe_exempt(&self, card: &Card) -> bool {
        card.is_basic_land() || (self.rules.exempt_non_creatures && !card.is_creature())
    }

    /// Whether `card` belongs in `commander`'s pool for `tribal_type`
    pub fn is_eligible(&self, card: &Card, commander: &Card, tribal_type: &str) -> bool {
        if card.id == commander.id {
            return false;
        }
        if !card
            .color_identity()
            .is_subset_of(commander.color_identity())
        {
            return false;
        }
        self.is_tribe_exempt(card) || card.type_line.contains(tribal_type.trim())
    }

    /// Build the candidate pool in catalog order.
    ///
    /// Fails with [`DomainError::EmptyPool`] when nothing qualifies.
    pub fn filter(
        &self,
        catalog: &CardCatalog,
        commander: &Card,
        tribal_type: &str,
    ) -> Result<CandidatePool, DomainError> {
        let cards: Vec<Card> = catalog
            .iter()
            .filter(|card| self.is_eligible(card, commander, tribal_type))
            .cloned()
            .collect();

        debug!(
            "Eligibility: {} of {} cards qualify for {} ({})",
            cards.len(),
            catalog.len(),
            commander.name,
            tribal_type
        );

        if cards.is_empty() {
            return Err(DomainError::EmptyPool {
                commander: commander.name.clone(),
                tribal_type: tribal_type.to_string(),
            });
        }

        Ok(CandidatePool { cards })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::ColorSet;

    fn colors(s: &str) -> ColorSet {
        s.parse().unwrap()
    }

    fn catalog() -> CardCatalog {
        CardCatalog::from_cards([
            Card::new("cmd", "Edgar Markov", "Legendary Creature — Vampire Knight")
                .with_colors(colors("WBR")),
            Card::new("v1", "Bloodghast", "Creature — Vampire Spirit").with_colors(colors("B")),
            Card::new("z1", "Gravecrawler", "Creature — Zombie").with_colors(colors("B")),
            Card::new("v2", "Vampire Nighthawk", "Creature — Vampire Shaman")
                .with_colors(colors("B")),
            Card::new("g1", "Elvish Vampire", "Creature — Vampire Elf").with_colors(colors("G")),
            Card::new("i1", "Lightning Bolt", "Instant").with_colors(colors("R")),
            Card::new("a1", "Sol Ring", "Artifact"),
            Card::new("l1", "Swamp", "Basic Land — Swamp"),
            Card::new("u1", "Counterspell", "Instant").with_colors(colors("U")),
        ])
    }

    fn ids(pool: &CandidatePool) -> Vec<&str> {
        pool.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_filter_default_rules() {
        let catalog = catalog();
        let commander = catalog.find_by_name("Edgar Markov").unwrap();
        let pool = EligibilityFilter::default()
            .filter(&catalog, commander, "vampire")
            .unwrap();

        assert_eq!(ids(&pool), vec!["v1", "v2", "i1", "a1", "l1"]);
    }

    #[test]
    fn test_filter_strict_rules_keeps_only_tribe_and_basics() {
        let catalog = catalog();
        let commander = catalog.find_by_name("Edgar Markov").unwrap();
        let pool = EligibilityFilter::new(EligibilityRules::strict())
            .filter(&catalog, commander, "Vampire")
            .unwrap();

        assert_eq!(ids(&pool), vec!["v1", "v2", "l1"]);
    }

    #[test]
    fn test_every_member_satisfies_rules() {
        let catalog = catalog();
        let commander = catalog.find_by_name("Edgar Markov").unwrap();
        let filter = EligibilityFilter::default();
        let pool = filter.filter(&catalog, commander, "Vampire").unwrap();

        for card in pool.iter() {
            assert_ne!(card.id, commander.id);
            assert!(card.color_identity().is_subset_of(commander.color_identity()));
            assert!(filter.is_tribe_exempt(card) || card.type_line.contains("vampire"));
        }
    }

    #[test]
    fn test_commander_never_in_pool() {
        let catalog = catalog();
        let commander = catalog.find_by_name("Edgar Markov").unwrap();
        let pool = EligibilityFilter::default()
            .filter(&catalog, commander, "Knight")
            .unwrap();
        assert!(!pool.contains(&commander.id));
    }

    #[test]
    fn test_example_color_scenario() {
        let catalog = CardCatalog::from_cards([
            Card::new("cmd", "Commander", "Legendary Creature — Human")
                .with_colors(colors("WU")),
            Card::new("A", "Card A", "Creature — Human").with_colors(colors("W")),
            Card::new("B", "Card B", "Creature — Human").with_colors(colors("WU")),
            Card::new("C", "Card C", "Creature — Human").with_colors(colors("B")),
        ]);
        let commander = catalog.find_by_name("Commander").unwrap();
        let pool = EligibilityFilter::default()
            .filter(&catalog, commander, "human")
            .unwrap();
        assert_eq!(ids(&pool), vec!["A", "B"]);
    }

    #[test]
    fn test_empty_pool_is_error() {
        let catalog = CardCatalog::from_cards([
            Card::new("cmd", "Commander", "Legendary Creature — Human").with_colors(colors("W")),
            Card::new("x", "Off Color", "Creature — Human").with_colors(colors("B")),
        ]);
        let commander = catalog.find_by_name("Commander").unwrap();
        let err = EligibilityFilter::default()
            .filter(&catalog, commander, "Human")
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyPool { .. }));
    }

    #[test]
    fn test_blank_tribal_type_matches_every_creature() {
        let catalog = catalog();
        let commander = catalog.find_by_name("Edgar Markov").unwrap();
        let pool = EligibilityFilter::new(EligibilityRules::strict())
            .filter(&catalog, commander, "  ")
            .unwrap();
        assert!(pool.contains(&CardId::from("z1")));
    }
}
