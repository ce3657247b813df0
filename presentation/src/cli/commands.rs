//! CLI command definitions

use clap::{Parser, ValueEnum};
use deckweaver_application::DeckBuildConfig;
use deckweaver_domain::SimilarityWeights;
use std::path::PathBuf;

/// Output format for deck results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full report with pool statistics and the ranked deck
    Full,
    /// One card name per line
    List,
    /// JSON report
    Json,
}

impl From<OutputFormat> for deckweaver_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::List => Self::List,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// CLI arguments for deckweaver
#[derive(Parser, Debug)]
#[command(name = "deckweaver")]
#[command(author, version, about = "Build a tribal commander deck from card similarity")]
#[command(long_about = r#"
Deckweaver builds a singleton commander deck around a commander and a tribe.

The pipeline has four stages:
1. Eligibility: keep cards within the commander's color identity that fit the tribe
2. Similarity: score every pair of candidates on rules text, types and colors
3. Graph: connect pairs scoring above the similarity threshold
4. Selection: take the best-connected cards, up to the deck size

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. DECKWEAVER_* variables   e.g. DECKWEAVER_DECK__DECK_SIZE=60
3. ./deckweaver.toml        Project-level config
4. ~/.config/deckweaver/config.toml   Global config

Example:
  deckweaver "Lathril, Blade of the Elves" Elf --catalog card_dict.json
  deckweaver "Edgar Markov" Vampire --threshold 0.4 -o list
  deckweaver "Krenko, Mob Boss" Goblin --central 5 --graph-out goblins.json
"#)]
pub struct Cli {
    /// Commander card name (case-insensitive)
    #[arg(required_unless_present = "show_config")]
    pub commander: Option<String>,

    /// Tribal creature type, e.g. "Elf"
    #[arg(required_unless_present = "show_config")]
    pub tribe: Option<String>,

    /// Path to the card catalog JSON file
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Minimum similarity (exclusive) for two cards to be connected
    #[arg(long, value_name = "F")]
    pub threshold: Option<f64>,

    /// Number of cards beside the commander
    #[arg(long, value_name = "N")]
    pub deck_size: Option<usize>,

    /// Weight of rules-text similarity
    #[arg(long, value_name = "F")]
    pub text_weight: Option<f64>,

    /// Weight of type-line similarity
    #[arg(long, value_name = "F")]
    pub type_weight: Option<f64>,

    /// Weight of color similarity
    #[arg(long, value_name = "F")]
    pub color_weight: Option<f64>,

    /// Require the tribal type on non-creature cards too
    #[arg(long)]
    pub strict_tribal: bool,

    /// Cap the number of cards per primary type
    #[arg(long)]
    pub type_quotas: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write the similarity graph as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub graph_out: Option<PathBuf>,

    /// Also list the N most central cards of the graph
    #[arg(long, value_name = "N")]
    pub central: Option<usize>,

    /// Show one card's record and whether it made the deck
    #[arg(long, value_name = "NAME")]
    pub inspect: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and the effective config, then exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a file-derived config
    pub fn apply_overrides(&self, mut config: DeckBuildConfig) -> DeckBuildConfig {
        if let Some(threshold) = self.threshold {
            config.similarity_threshold = threshold;
        }
        if let Some(deck_size) = self.deck_size {
            config.deck_size = deck_size;
        }

        let SimilarityWeights {
            text_weight,
            type_weight,
            color_weight,
        } = config.weights;
        config.weights = SimilarityWeights::new(
            self.text_weight.unwrap_or(text_weight),
            self.type_weight.unwrap_or(type_weight),
            self.color_weight.unwrap_or(color_weight),
        );

        if self.strict_tribal {
            config.eligibility.exempt_non_creatures = false;
        }
        if self.type_quotas {
            config.enforce_type_quotas = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deckweaver_domain::TypeQuotas;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("deckweaver").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let cli = parse(&["Lathril, Blade of the Elves", "Elf"]);
        assert_eq!(cli.commander.as_deref(), Some("Lathril, Blade of the Elves"));
        assert_eq!(cli.tribe.as_deref(), Some("Elf"));
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_commander_required_without_show_config() {
        assert!(Cli::try_parse_from(["deckweaver"]).is_err());
        assert!(Cli::try_parse_from(["deckweaver", "--show-config"]).is_ok());
    }

    #[test]
    fn test_output_and_verbosity() {
        let cli = parse(&["Cmd", "Elf", "-o", "json", "-vv", "--central", "5"]);
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.central, Some(5));
        assert_eq!(
            deckweaver_domain::OutputFormat::from(OutputFormat::Json),
            deckweaver_domain::OutputFormat::Json
        );
    }

    #[test]
    fn test_no_flags_keep_file_config() {
        let base = DeckBuildConfig::default().with_deck_size(60);
        let cli = parse(&["Cmd", "Elf"]);
        assert_eq!(cli.apply_overrides(base.clone()), base);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "Cmd",
            "Elf",
            "--threshold",
            "0.3",
            "--deck-size",
            "40",
            "--text-weight",
            "0.5",
            "--type-weight",
            "0.35",
            "--strict-tribal",
            "--type-quotas",
        ]);
        let config = cli.apply_overrides(DeckBuildConfig::default());

        assert_eq!(config.similarity_threshold, 0.3);
        assert_eq!(config.deck_size, 40);
        assert_eq!(config.weights.text_weight, 0.5);
        assert_eq!(config.weights.type_weight, 0.35);
        assert_eq!(config.weights.color_weight, 0.15);
        assert!(!config.eligibility.exempt_non_creatures);
        assert_eq!(config.active_type_quotas(), Some(TypeQuotas::default()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_type_quotas_flag_keeps_configured_caps() {
        let custom = TypeQuotas {
            creature: 20,
            ..Default::default()
        };
        let base = DeckBuildConfig::default().with_type_quotas(custom);
        let cli = parse(&["Cmd", "Elf", "--type-quotas"]);
        assert_eq!(cli.apply_overrides(base).active_type_quotas(), Some(custom));
    }

    #[test]
    fn test_type_quotas_flag_enables_caps_from_disabled_file_section() {
        // `[quotas] creature = 20` with `deck.type_quotas = false`
        let mut base = DeckBuildConfig::default();
        base.type_quotas = TypeQuotas {
            creature: 20,
            ..Default::default()
        };
        assert!(base.active_type_quotas().is_none());

        let cli = parse(&["Cmd", "Elf", "--type-quotas"]);
        let effective = cli.apply_overrides(base);
        assert_eq!(effective.active_type_quotas().map(|q| q.creature), Some(20));
    }
}
