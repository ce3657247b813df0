//! Card catalog adapters

mod json_catalog;

pub use json_catalog::{JsonCardCatalog, parse_catalog};
