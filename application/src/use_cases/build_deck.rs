//! Build Commander Deck use case
//!
//! Orchestrates the full deck-building flow:
//!
//! ```text
//! Config ─► Catalog ─► Commander ─► Eligibility ─► Similarity ─► Graph ─► Selection
//! ```
//!
//! [`build_commander_deck`] is the pure entry point over an in-memory catalog.
//! [`BuildDeckUseCase`] adds catalog loading through a [`CardCatalogProvider`]
//! and runs the CPU-bound stages on the blocking pool. Each run owns a
//! [`CancellationToken`] that is cancelled when the `execute` future is
//! dropped, so a caller-level timeout also stops the blocking work: stages
//! poll the token between steps and the similarity pass polls it per row.

use crate::config::DeckBuildConfig;
use crate::ports::card_catalog::{CardCatalogProvider, CatalogError};
use crate::ports::progress::{NoProgress, PipelineProgress};
use deckweaver_domain::{
    Card, CardCatalog, Deck, DeckSelector, DomainError, EligibilityFilter, GraphBuilder,
    PipelineStage, SimilarityEngine, SimilarityGraph,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur while building a deck
#[derive(Error, Debug)]
pub enum BuildDeckError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Cancelled before the {0} stage finished")]
    Cancelled(PipelineStage),

    #[error("Pipeline task failed: {0}")]
    TaskFailed(String),
}

impl BuildDeckError {
    /// The stage that failed, when known
    pub fn stage(&self) -> Option<PipelineStage> {
        match self {
            BuildDeckError::Domain(e) => Some(match e {
                DomainError::UnknownCommander(_) => PipelineStage::Commander,
                DomainError::EmptyPool { .. } => PipelineStage::Eligibility,
                DomainError::InvalidConfig(_) => PipelineStage::Config,
            }),
            BuildDeckError::Catalog(_) => Some(PipelineStage::Catalog),
            BuildDeckError::Cancelled(stage) => Some(*stage),
            BuildDeckError::TaskFailed(_) => None,
        }
    }

    /// Whether the caller can retry with different input
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BuildDeckError::Domain(e) if e.is_recoverable())
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, BuildDeckError::Cancelled(_))
    }
}

/// Returns `Err(BuildDeckError::Cancelled(stage))` if the token exists and is cancelled.
fn check_cancelled(
    token: Option<&CancellationToken>,
    stage: PipelineStage,
) -> Result<(), BuildDeckError> {
    if let Some(token) = token
        && token.is_cancelled()
    {
        return Err(BuildDeckError::Cancelled(stage));
    }
    Ok(())
}

/// Input for the BuildDeck use case
#[derive(Debug, Clone)]
pub struct BuildDeckInput {
    /// Commander name, resolved case-insensitively against the catalog
    pub commander_name: String,
    /// Tribal type every non-exempt card must carry
    pub tribal_type: String,
    pub config: DeckBuildConfig,
}

impl BuildDeckInput {
    pub fn new(commander_name: impl Into<String>, tribal_type: impl Into<String>) -> Self {
        Self {
            commander_name: commander_name.into(),
            tribal_type: tribal_type.into(),
            config: DeckBuildConfig::default(),
        }
    }

    pub fn with_config(mut self, config: DeckBuildConfig) -> Self {
        self.config = config;
        self
    }
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct BuildDeckOutput {
    pub commander: Card,
    pub tribal_type: String,
    /// Number of eligible candidates
    pub pool_size: usize,
    /// Number of scored pairs
    pub pair_count: usize,
    /// The similarity graph, kept for inspection and export
    pub graph: SimilarityGraph,
    pub deck: Deck,
}

/// Build a deck from an in-memory catalog.
pub fn build_commander_deck(
    catalog: &CardCatalog,
    commander_name: &str,
    tribal_type: &str,
    config: &DeckBuildConfig,
) -> Result<Deck, BuildDeckError> {
    run_pipeline(catalog, commander_name, tribal_type, config, &NoProgress).map(|o| o.deck)
}

/// Run every stage after catalog loading, reporting through `progress`.
pub fn run_pipeline(
    catalog: &CardCatalog,
    commander_name: &str,
    tribal_type: &str,
    config: &DeckBuildConfig,
    progress: &dyn PipelineProgress,
) -> Result<BuildDeckOutput, BuildDeckError> {
    run_stages(catalog, commander_name, tribal_type, config, progress, None)
}

fn run_stages(
    catalog: &CardCatalog,
    commander_name: &str,
    tribal_type: &str,
    config: &DeckBuildConfig,
    progress: &dyn PipelineProgress,
    cancel: Option<&CancellationToken>,
) -> Result<BuildDeckOutput, BuildDeckError> {
    let result = stages(catalog, commander_name, tribal_type, config, progress, cancel);
    if let Err(e) = &result
        && let Some(stage) = e.stage()
    {
        progress.on_stage_failed(stage, &e.to_string());
    }
    result
}

fn stages(
    catalog: &CardCatalog,
    commander_name: &str,
    tribal_type: &str,
    config: &DeckBuildConfig,
    progress: &dyn PipelineProgress,
    cancel: Option<&CancellationToken>,
) -> Result<BuildDeckOutput, BuildDeckError> {
    progress.on_stage_start(PipelineStage::Config, 1);
    config.validate()?;
    let engine = SimilarityEngine::new(config.weights)?;
    let graph_builder = GraphBuilder::new(config.similarity_threshold)?;
    let mut selector = DeckSelector::new(config.deck_size);
    if let Some(quotas) = config.active_type_quotas() {
        selector = selector.with_type_quotas(quotas);
    }
    progress.on_stage_complete(PipelineStage::Config, 1);

    progress.on_stage_start(PipelineStage::Commander, catalog.len());
    let commander = catalog.resolve_commander(commander_name)?;
    info!(
        "Building deck for {} ({}) with tribal type '{}'",
        commander.name,
        commander.color_identity(),
        tribal_type
    );
    progress.on_stage_complete(PipelineStage::Commander, 1);

    check_cancelled(cancel, PipelineStage::Eligibility)?;
    progress.on_stage_start(PipelineStage::Eligibility, catalog.len());
    let pool = EligibilityFilter::new(config.eligibility).filter(catalog, commander, tribal_type)?;
    info!("Candidate pool: {} cards", pool.len());
    progress.on_stage_complete(PipelineStage::Eligibility, pool.len());

    check_cancelled(cancel, PipelineStage::Similarity)?;
    progress.on_stage_start(PipelineStage::Similarity, pool.len());
    let similarities = match cancel {
        Some(token) => engine
            .score_all_until(&pool, || token.is_cancelled())
            .ok_or(BuildDeckError::Cancelled(PipelineStage::Similarity))?,
        None => engine.score_all(&pool),
    };
    debug!("Scored {} pairs", similarities.len());
    progress.on_stage_complete(PipelineStage::Similarity, similarities.len());

    check_cancelled(cancel, PipelineStage::Graph)?;
    progress.on_stage_start(PipelineStage::Graph, similarities.len());
    let graph = graph_builder.build(&pool, &similarities);
    info!(
        "Similarity graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    progress.on_stage_complete(PipelineStage::Graph, graph.edge_count());

    check_cancelled(cancel, PipelineStage::Selection)?;
    progress.on_stage_start(PipelineStage::Selection, pool.len());
    let deck = selector.select(&graph, commander, &pool);
    info!("Selected {} cards", deck.len());
    progress.on_stage_complete(PipelineStage::Selection, deck.len());

    Ok(BuildDeckOutput {
        commander: commander.clone(),
        tribal_type: tribal_type.to_string(),
        pool_size: pool.len(),
        pair_count: similarities.len(),
        graph,
        deck,
    })
}

/// Use case for building a commander deck from a catalog provider
pub struct BuildDeckUseCase<P: CardCatalogProvider + 'static> {
    provider: Arc<P>,
    cancellation_token: Option<CancellationToken>,
}

impl<P: CardCatalogProvider + 'static> BuildDeckUseCase<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: BuildDeckInput) -> Result<BuildDeckOutput, BuildDeckError> {
        self.execute_with_progress(input, Arc::new(NoProgress)).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: BuildDeckInput,
        progress: Arc<dyn PipelineProgress>,
    ) -> Result<BuildDeckOutput, BuildDeckError> {
        // Dropping this future cancels the run, including its blocking stages
        let token = match &self.cancellation_token {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        };
        let _guard = token.clone().drop_guard();

        if let Err(e) = check_cancelled(Some(&token), PipelineStage::Catalog) {
            progress.on_stage_failed(PipelineStage::Catalog, &e.to_string());
            return Err(e);
        }

        // Fail fast before touching the catalog
        if let Err(e) = input.config.validate() {
            progress.on_stage_failed(PipelineStage::Config, &e.to_string());
            return Err(e.into());
        }

        progress.on_stage_start(PipelineStage::Catalog, 0);
        let catalog = match self.provider.load_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => {
                progress.on_stage_failed(PipelineStage::Catalog, &e.to_string());
                return Err(e.into());
            }
        };
        info!(
            "Loaded {} cards from {}",
            catalog.len(),
            self.provider.source_description()
        );
        progress.on_stage_complete(PipelineStage::Catalog, catalog.len());

        tokio::task::spawn_blocking(move || {
            run_stages(
                &catalog,
                &input.commander_name,
                &input.tribal_type,
                &input.config,
                progress.as_ref(),
                Some(&token),
            )
        })
        .await
        .map_err(|e| BuildDeckError::TaskFailed(e.to_string()))?
    }
}
