//! Fail-fast pipeline over external processing stages.
//!
//! A run is an ordered list of stage descriptors, each executed as a child
//! process to completion. The first failing stage halts the run and every
//! later stage stays untouched.

pub mod orchestrator;
pub mod stage;
pub mod steps;

pub use orchestrator::{PipelineOrchestrator, PipelineOutcome};
pub use stage::{ProcessStageRunner, StageOutcome, StageRunner, StageSpec};
pub use steps::canonical_stages;
