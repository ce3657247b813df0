//! Rules-text tokenization
//!
//! Tokens are lowercase alphanumeric runs of at least two characters.
//! Known ability keywords found in the text are emitted a second time so
//! that shared mechanics weigh more than shared filler words.

/// Ability keywords and rules phrases that get extra weight
pub const ABILITY_KEYWORDS: &[&str] = &[
    "additional cost",
    "aura",
    "combat damage",
    "counter",
    "deathtouch",
    "defender",
    "destroy",
    "discard",
    "double strike",
    "enchant",
    "enters the battlefield",
    "equipment",
    "exile",
    "first strike",
    "flash",
    "flashback",
    "flying",
    "goad",
    "haste",
    "hexproof",
    "indestructible",
    "leaves the battlefield",
    "legendary",
    "lifelink",
    "mana value",
    "menace",
    "mulligan",
    "opponent",
    "planeswalker",
    "put onto the battlefield",
    "reach",
    "sacrifice",
    "scry",
    "shuffle",
    "token",
    "trample",
    "vigilance",
];

/// Split text into lowercase terms.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_lowercase)
        .collect()
}

/// Keywords from [`ABILITY_KEYWORDS`] that occur in `tokens` as whole words
pub fn ability_keywords(tokens: &[String]) -> Vec<&'static str> {
    ABILITY_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| {
            let words: Vec<&str> = keyword.split(' ').collect();
            tokens
                .windows(words.len())
                .any(|window| window.iter().zip(&words).all(|(t, w)| t == w))
        })
        .collect()
}

/// Terms used for the text signal: the tokens plus one extra copy of every
/// word of each matched ability keyword.
pub fn feature_terms(text: &str) -> Vec<String> {
    let mut terms = tokenize(text);
    let emphasis: Vec<String> = ability_keywords(&terms)
        .into_iter()
        .flat_map(|k| k.split(' '))
        .map(String::from)
        .collect();
    terms.extend(emphasis);
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Flying, lifelink. {T}: Add {G}.");
        assert_eq!(tokens, vec!["flying", "lifelink", "add"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  {W}  ").is_empty());
    }

    #[test]
    fn test_ability_keywords_whole_words() {
        let tokens = tokenize("First strike. When this enters the battlefield, scry 2.");
        let keywords = ability_keywords(&tokens);
        assert!(keywords.contains(&"first strike"));
        assert!(keywords.contains(&"enters the battlefield"));
        assert!(keywords.contains(&"scry"));
        assert!(!keywords.contains(&"flash"));
    }

    #[test]
    fn test_feature_terms_emphasise_keywords() {
        let terms = feature_terms("Flying");
        assert_eq!(terms, vec!["flying", "flying"]);

        let terms = feature_terms("Draw a card.");
        assert_eq!(terms, vec!["draw", "card"]);
    }
}
