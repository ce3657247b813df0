//! Configuration file loading for deckweaver
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Environment variables prefixed `DECKWEAVER_`
//! 3. Project root: `./deckweaver.toml` or `./.deckweaver.toml`
//! 4. Global: `<config dir>/deckweaver/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBehaviorConfig, FileCatalogConfig, FileConfig, FileDeckConfig,
    FileOutputConfig, FileOutputFormat, FileWeightsConfig,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
