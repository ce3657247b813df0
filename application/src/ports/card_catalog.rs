//! Card catalog port
//!
//! Defines how the application layer obtains a materialized card catalog.
//! Fetching, caching and parsing raw card data is the adapter's business.

use async_trait::async_trait;
use deckweaver_domain::CardCatalog;
use thiserror::Error;

/// Errors that can occur while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(String),

    #[error("Invalid card '{name}': {reason}")]
    InvalidCard { name: String, reason: String },

    #[error("Catalog {0} contains no usable cards")]
    Empty(String),
}

/// Provider of the card catalog
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait CardCatalogProvider: Send + Sync {
    /// Load the full catalog into memory
    async fn load_catalog(&self) -> Result<CardCatalog, CatalogError>;

    /// Human-readable description of the source (e.g. a file path)
    fn source_description(&self) -> String;
}

/// Provider serving an already-built catalog
pub struct InMemoryCatalog {
    catalog: CardCatalog,
}

impl InMemoryCatalog {
    pub fn new(catalog: CardCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CardCatalogProvider for InMemoryCatalog {
    async fn load_catalog(&self) -> Result<CardCatalog, CatalogError> {
        Ok(self.catalog.clone())
    }

    fn source_description(&self) -> String {
        format!("in-memory ({} cards)", self.catalog.len())
    }
}
