//! Colors and color sets
//!
//! A [`ColorSet`] is a five-bit set over [`Color`]. The empty set is colorless.
//! Catalog data spells colors either as symbols (`"W"`) or names (`"White"`);
//! the pseudo-color `"Colorless"` parses to the empty set.

use serde::{Deserialize, Serialize};

/// One of the five colors of mana
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    /// All colors in WUBRG order
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    /// Basic land that produces this color
    pub fn basic_land(self) -> &'static str {
        match self {
            Color::White => "Plains",
            Color::Blue => "Island",
            Color::Black => "Swamp",
            Color::Red => "Mountain",
            Color::Green => "Forest",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "u" | "blue" => Ok(Color::Blue),
            "b" | "black" => Ok(Color::Black),
            "r" | "red" => Ok(Color::Red),
            "g" | "green" => Ok(Color::Green),
            _ => Err(format!("Unknown color: {}", s)),
        }
    }
}

/// A set of colors (Value Object)
///
/// Serializes as its WUBRG symbol string, e.g. `"WU"`; colorless is `""`.
///
/// # Example
///
/// ```
/// use deckweaver_domain::card::{Color, ColorSet};
///
/// let azorius: ColorSet = "WU".parse().unwrap();
/// let mono_white = ColorSet::from_colors([Color::White]);
/// assert!(mono_white.is_subset_of(azorius));
/// assert!(!azorius.is_subset_of(mono_white));
/// assert!(ColorSet::colorless().is_subset_of(mono_white));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ColorSet(u8);

impl ColorSet {
    pub fn colorless() -> Self {
        Self(0)
    }

    pub fn from_colors(colors: impl IntoIterator<Item = Color>) -> Self {
        let mut set = Self::colorless();
        for color in colors {
            set.insert(color);
        }
        set
    }

    /// Parse a list of catalog color tokens (symbols or names).
    ///
    /// `"Colorless"` and `"C"` contribute nothing.
    pub fn parse_tokens<I, S>(tokens: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::colorless();
        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty()
                || token.eq_ignore_ascii_case("colorless")
                || token.eq_ignore_ascii_case("c")
            {
                continue;
            }
            set.insert(token.parse()?);
        }
        Ok(set)
    }

    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    pub fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    pub fn is_colorless(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.is_colorless()
    }

    /// Every color of `self` is also in `other`. Colorless is a subset of everything.
    pub fn is_subset_of(self, other: ColorSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn union(self, other: ColorSet) -> ColorSet {
        ColorSet(self.0 | other.0)
    }

    pub fn intersection(self, other: ColorSet) -> ColorSet {
        ColorSet(self.0 & other.0)
    }

    /// Jaccard agreement in [0, 1]. Two colorless sets agree fully.
    pub fn agreement(self, other: ColorSet) -> f64 {
        let union = self.union(other).len();
        if union == 0 {
            return 1.0;
        }
        self.intersection(other).len() as f64 / union as f64
    }

    /// Colors in WUBRG order
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl std::fmt::Display for ColorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_colorless() {
            return write!(f, "C");
        }
        for color in self.iter() {
            write!(f, "{}", color.symbol())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for ColorSet {
    type Err = String;

    /// Parses a symbol string such as `"WUB"`; `""` and `"C"` are colorless.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("c") {
            return Ok(Self::colorless());
        }
        let mut set = Self::colorless();
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            set.insert(ch.to_string().parse()?);
        }
        Ok(set)
    }
}

impl From<ColorSet> for String {
    fn from(set: ColorSet) -> Self {
        set.iter().map(Color::symbol).collect()
    }
}

impl TryFrom<String> for ColorSet {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromIterator<Color> for ColorSet {
    fn from_iter<T: IntoIterator<Item = Color>>(iter: T) -> Self {
        Self::from_colors(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_names_and_symbols() {
        assert_eq!("W".parse::<Color>().ok(), Some(Color::White));
        assert_eq!("blue".parse::<Color>().ok(), Some(Color::Blue));
        assert_eq!("Green".parse::<Color>().ok(), Some(Color::Green));
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_tokens_skips_colorless() {
        let set = ColorSet::parse_tokens(["Colorless"]).unwrap();
        assert!(set.is_colorless());

        let set = ColorSet::parse_tokens(["White", "Blue"]).unwrap();
        assert_eq!(set.to_string(), "WU");
    }

    #[test]
    fn test_subset() {
        let wu: ColorSet = "WU".parse().unwrap();
        let w: ColorSet = "W".parse().unwrap();
        let b: ColorSet = "B".parse().unwrap();

        assert!(w.is_subset_of(wu));
        assert!(wu.is_subset_of(wu));
        assert!(!b.is_subset_of(wu));
        assert!(ColorSet::colorless().is_subset_of(w));
        assert!(!w.is_subset_of(ColorSet::colorless()));
    }

    #[test]
    fn test_agreement() {
        let wu: ColorSet = "WU".parse().unwrap();
        let w: ColorSet = "W".parse().unwrap();
        let b: ColorSet = "B".parse().unwrap();

        assert_eq!(w.agreement(wu), 0.5);
        assert_eq!(wu.agreement(w), 0.5);
        assert_eq!(w.agreement(b), 0.0);
        assert_eq!(ColorSet::colorless().agreement(ColorSet::colorless()), 1.0);
        assert_eq!(ColorSet::colorless().agreement(w), 0.0);
    }

    #[test]
    fn test_display_and_order() {
        let set: ColorSet = "GW".parse().unwrap();
        assert_eq!(set.to_string(), "WG");
        assert_eq!(ColorSet::colorless().to_string(), "C");
    }

    #[test]
    fn test_serde_as_symbols() {
        let set: ColorSet = "UB".parse().unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "\"UB\"");

        let parsed: ColorSet = serde_json::from_str("\"\"").unwrap();
        assert!(parsed.is_colorless());
    }
}
