//! CLI entrypoint for deckweaver
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use deckweaver_application::{
    BuildDeckError, BuildDeckInput, BuildDeckOutput, BuildDeckUseCase, CardCatalogProvider,
    PipelineProgress,
};
use deckweaver_domain::OutputFormat;
use deckweaver_infrastructure::{
    ConfigLoader, FileConfig, GraphDocument, JsonCardCatalog, write_graph_json,
};
use deckweaver_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting deckweaver");

    // Load configuration
    let file_config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("{}", e))?
    };

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        println!();
        println!("{}", file_config.to_toml_string()?);
        return Ok(());
    }

    file_config.validate().context("Invalid configuration")?;

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let (Some(commander), Some(tribe)) = (cli.commander.clone(), cli.tribe.clone()) else {
        bail!("A commander and a tribal type are required.");
    };

    let deck_config = cli.apply_overrides(file_config.to_deck_config());
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| file_config.catalog.path.clone().into());
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(file_config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let provider = Arc::new(JsonCardCatalog::new(catalog_path));
    let use_case = BuildDeckUseCase::new(provider.clone());
    let input = BuildDeckInput::new(commander, tribe).with_config(deck_config);

    let progress: Arc<dyn PipelineProgress> = if cli.quiet || format == OutputFormat::Json {
        Arc::new(deckweaver_application::NoProgress)
    } else if std::io::stderr().is_terminal() {
        Arc::new(ProgressReporter::new())
    } else {
        Arc::new(SimpleProgress)
    };

    let run = use_case.execute_with_progress(input, progress);
    let result = match file_config.behavior.timeout_seconds {
        Some(secs) => tokio::time::timeout(Duration::from_secs(secs), run)
            .await
            .map_err(|_| anyhow!("Deck build timed out after {}s", secs))?,
        None => run.await,
    };
    let output = result.map_err(describe_failure)?;

    // Output results
    let rendered = match format {
        OutputFormat::Full => ConsoleFormatter::format(&output),
        OutputFormat::List => ConsoleFormatter::format_list(&output),
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    print!("{}", rendered);

    if let Some(n) = cli.central {
        print!("{}", ConsoleFormatter::format_central(&output.graph, n));
    }

    if let Some(name) = &cli.inspect {
        inspect(provider.as_ref(), name, &output).await?;
    }

    if let Some(path) = &cli.graph_out {
        let document =
            GraphDocument::new(&output.commander.name, &output.tribal_type, &output.graph);
        write_graph_json(&document, path).await?;
    }

    Ok(())
}

/// Prefix pipeline errors with the stage that raised them
fn describe_failure(e: BuildDeckError) -> anyhow::Error {
    match e.stage() {
        Some(stage) => anyhow!("{} stage failed: {}", stage, e),
        None => e.into(),
    }
}

async fn inspect(provider: &JsonCardCatalog, name: &str, output: &BuildDeckOutput) -> Result<()> {
    let catalog = provider.load_catalog().await?;
    match catalog.find_by_name(name) {
        Some(card) => print!("{}", ConsoleFormatter::format_card(card, output)),
        None => warn!("No card named '{}' in {}", name, provider.source_description()),
    }
    Ok(())
}
