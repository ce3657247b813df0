//! Infrastructure layer for deckweaver
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the JSON card catalog, configuration file
//! loading, and the similarity graph export.

pub mod catalog;
pub mod config;
pub mod export;

// Re-export commonly used types
pub use catalog::{JsonCardCatalog, parse_catalog};
pub use config::{
    ConfigLoader, ConfigValidationError, FileBehaviorConfig, FileCatalogConfig, FileConfig,
    FileDeckConfig, FileOutputConfig, FileOutputFormat, FileWeightsConfig,
};
pub use export::{ExportError, GraphDocument, write_graph_json};
