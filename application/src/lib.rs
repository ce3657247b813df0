//! Application layer for deckweaver
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::DeckBuildConfig;
pub use ports::{
    card_catalog::{CardCatalogProvider, CatalogError, InMemoryCatalog},
    progress::{NoProgress, PipelineProgress},
};
pub use use_cases::build_deck::{
    BuildDeckError, BuildDeckInput, BuildDeckOutput, BuildDeckUseCase, build_commander_deck,
    run_pipeline,
};
