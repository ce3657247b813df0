//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// File names checked in the working directory, first match wins
const PROJECT_CONFIG_FILES: [&str; 2] = ["deckweaver.toml", ".deckweaver.toml"];

/// Prefix of environment overrides, e.g. `DECKWEAVER_DECK__DECK_SIZE=60`
pub const ENV_PREFIX: &str = "DECKWEAVER_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Environment: `DECKWEAVER_<SECTION>__<KEY>`
    /// 3. Project root: `./deckweaver.toml` or `./.deckweaver.toml`
    /// 4. Global: `<config dir>/deckweaver/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("deckweaver").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            println!("  [FOUND] Explicit: {}", path.display());
        }

        println!("  [     ] Env:     {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./deckweaver.toml or ./.deckweaver.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckweaver_domain::{DECK_SIZE, OutputFormat};
    use figment::Jail;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.deck.deck_size, DECK_SIZE);
        assert!(config.deck.exempt_non_creatures);
        assert!(config.behavior.timeout_seconds.is_none());
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("deckweaver"));
    }

    #[test]
    fn test_project_file_is_merged() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "deckweaver.toml",
                r#"
                [deck]
                deck_size = 60

                [catalog]
                path = "my_cards.json"
                "#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.deck.deck_size, 60);
            assert_eq!(config.catalog.path, "my_cards.json");
            assert!(config.deck.exempt_non_creatures);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file(".deckweaver.toml", "[deck]\ndeck_size = 60\n")?;
            jail.set_env("DECKWEAVER_DECK__DECK_SIZE", "40");
            jail.set_env("DECKWEAVER_OUTPUT__FORMAT", "json");

            let config = ConfigLoader::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.deck.deck_size, 40);
            assert_eq!(config.output.format, Some(OutputFormat::Json));
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_has_highest_priority() {
        Jail::expect_with(|jail| {
            jail.create_file("deckweaver.toml", "[deck]\nsimilarity_threshold = 0.6\n")?;
            jail.create_file("custom.toml", "[deck]\nsimilarity_threshold = 0.8\n")?;
            jail.set_env("DECKWEAVER_DECK__SIMILARITY_THRESHOLD", "0.7");

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| e.to_string())?;
            assert_eq!(config.deck.similarity_threshold, 0.8);
            Ok(())
        });
    }
}
