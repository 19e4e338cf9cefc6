//! Sequential fail-fast execution of pipeline stages.

use owo_colors::OwoColorize;

use crate::pipeline::stage::{StageRunner, StageSpec};

/// Terminal state of a pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Every stage ran and succeeded.
    Completed,
    /// A stage failed; no later stage was started.
    Halted { index: usize, stage_name: String },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Completed)
    }
}

/// Runs stages strictly in order, stopping at the first failure.
pub struct PipelineOrchestrator<R: StageRunner> {
    runner: R,
}

impl<R: StageRunner> PipelineOrchestrator<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Execute the stages front to back.
    ///
    /// Each stage runs to completion before the next is considered. A failed
    /// outcome halts the run immediately; the remaining stages never start.
    pub fn execute(&self, stages: &[StageSpec]) -> PipelineOutcome {
        for (index, stage) in stages.iter().enumerate() {
            let outcome = self.runner.run(stage);
            if !outcome.success {
                return PipelineOutcome::Halted {
                    index,
                    stage_name: stage.name.clone(),
                };
            }
        }
        PipelineOutcome::Completed
    }
}

/// Print the terminal pipeline banner. Stage indices are shown 1-based.
pub fn print_outcome(outcome: &PipelineOutcome, total_stages: usize) {
    println!();
    match outcome {
        PipelineOutcome::Completed => {
            println!(
                "{} all {} stages finished",
                "pipeline completed:".green().bold(),
                total_stages
            );
        }
        PipelineOutcome::Halted { index, stage_name } => {
            eprintln!(
                "{} stage {} of {}: {}",
                "pipeline halted at".red().bold(),
                index + 1,
                total_stages,
                stage_name
            );
        }
    }
}
