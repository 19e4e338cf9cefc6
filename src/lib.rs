//! intervox - Offline interview audio analysis
//!
//! Six-stage pipeline from a raw recording to an annotated transcript:
//! speaker diarization, RTTM conversion, clip extraction, transcription,
//! alignment, and conversational analysis (roles, Q/A pairing, sentiment).

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod align;
pub mod analysis;
pub mod audio;
pub mod check;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diarize;
pub mod error;
pub mod exec;
pub mod paths;
pub mod pipeline;
pub mod rttm;
pub mod stages;
pub mod transcribe;
pub mod transcript;

// Core seams (stage invocation, external commands, sentiment scoring)
pub use exec::{CommandExecutor, SystemCommandExecutor};
pub use pipeline::stage::{ProcessStageRunner, StageOutcome, StageRunner, StageSpec};

// Pipeline
pub use pipeline::orchestrator::{PipelineOrchestrator, PipelineOutcome};
pub use pipeline::steps::canonical_stages;

// Error handling
pub use error::{IntervoxError, Result};

// Config and work directory layout
pub use config::Config;
pub use paths::ProjectPaths;

// Analysis (for embedding the engine without the CLI)
pub use analysis::engine::ConversationAnalysisEngine;
pub use analysis::language::Language;
pub use analysis::report::{InterviewDocument, InterviewReport};
pub use analysis::sentiment::{LexiconScorer, PolarityScorer};
pub use transcript::{Segment, TranscribedClip, Turn};

/// Build version string with optional git commit hash.
///
/// Returns `"0.2.1+abc1234"` when git hash is available, `"0.2.1"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
