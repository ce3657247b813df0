//! Application-level configuration.
//!
//! - [`DeckBuildConfig`]: every tunable of one deck-building run

pub mod deck_config;

pub use deck_config::DeckBuildConfig;
