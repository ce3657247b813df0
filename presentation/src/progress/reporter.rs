//! Progress reporting for deck-building runs

use colored::Colorize;
use deckweaver_application::PipelineProgress;
use deckweaver_domain::PipelineStage;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with one spinner per pipeline stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn unit(stage: PipelineStage) -> &'static str {
        match stage {
            PipelineStage::Config => "settings",
            PipelineStage::Catalog | PipelineStage::Commander => "cards",
            PipelineStage::Eligibility => "candidates",
            PipelineStage::Similarity => "pairs",
            PipelineStage::Graph => "edges",
            PipelineStage::Selection => "cards selected",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineProgress for ProgressReporter {
    fn on_stage_start(&self, stage: PipelineStage, input_size: usize) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message(if input_size > 0 {
            format!("{} in", input_size)
        } else {
            "...".to_string()
        });
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_stage_complete(&self, stage: PipelineStage, output_size: usize) {
        if let Some(pb) = self.stage_bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_with_message(format!(
                "{} {} {}",
                "v".green(),
                output_size,
                Self::unit(stage)
            ));
        }
    }

    fn on_stage_failed(&self, _stage: PipelineStage, reason: &str) {
        if let Some(pb) = self.stage_bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.abandon_with_message(format!("{} {}", "x".red(), reason));
        }
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl PipelineProgress for SimpleProgress {
    fn on_stage_start(&self, stage: PipelineStage, input_size: usize) {
        eprintln!(
            "{} {} ({} in)",
            "->".cyan(),
            stage.display_name().bold(),
            input_size
        );
    }

    fn on_stage_complete(&self, stage: PipelineStage, output_size: usize) {
        eprintln!(
            "  {} {} {}",
            "v".green(),
            output_size,
            ProgressReporter::unit(stage)
        );
    }

    fn on_stage_failed(&self, stage: PipelineStage, reason: &str) {
        eprintln!("  {} {} failed: {}", "x".red(), stage, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indicatif::ProgressDrawTarget;

    #[test]
    fn test_reporter_tracks_current_stage() {
        let reporter = ProgressReporter::new();
        reporter.multi.set_draw_target(ProgressDrawTarget::hidden());

        reporter.on_stage_start(PipelineStage::Eligibility, 120);
        assert!(reporter.stage_bar.lock().unwrap().is_some());

        reporter.on_stage_complete(PipelineStage::Eligibility, 40);
        assert!(reporter.stage_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_reporter_failure_clears_stage() {
        let reporter = ProgressReporter::new();
        reporter.multi.set_draw_target(ProgressDrawTarget::hidden());

        reporter.on_stage_start(PipelineStage::Commander, 10);
        reporter.on_stage_failed(PipelineStage::Commander, "Unknown commander: Nobody");
        assert!(reporter.stage_bar.lock().unwrap().is_none());

        // completing with no active stage is a no-op
        reporter.on_stage_complete(PipelineStage::Commander, 0);
    }

    #[test]
    fn test_units_cover_every_stage() {
        assert_eq!(ProgressReporter::unit(PipelineStage::Similarity), "pairs");
        assert_eq!(ProgressReporter::unit(PipelineStage::Graph), "edges");
    }
}
