//! Deck domain: ranked selection of the final card list.

pub mod entities;
pub mod quota;
pub mod selector;

pub use entities::{DECK_SIZE, Deck, DeckEntry};
pub use quota::TypeQuotas;
pub use selector::DeckSelector;
