//! Progress notification port
//!
//! Defines the interface for reporting progress during a deck-building run.

use deckweaver_domain::PipelineStage;

/// Callback for progress updates during a pipeline run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, etc.)
pub trait PipelineProgress: Send + Sync {
    /// Called when a stage starts; `input_size` is the number of items it consumes
    fn on_stage_start(&self, stage: PipelineStage, input_size: usize);

    /// Called when a stage finishes; `output_size` is the number of items it produced
    fn on_stage_complete(&self, stage: PipelineStage, output_size: usize);

    /// Called when a stage fails
    fn on_stage_failed(&self, _stage: PipelineStage, _reason: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl PipelineProgress for NoProgress {
    fn on_stage_start(&self, _stage: PipelineStage, _input_size: usize) {}
    fn on_stage_complete(&self, _stage: PipelineStage, _output_size: usize) {}
}
