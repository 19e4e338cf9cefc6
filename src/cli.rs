//! Command-line interface for intervox
//!
//! Provides argument parsing using clap derive macros. One subcommand per
//! pipeline stage plus `run` for the whole pipeline; every stage flag
//! defaults to the matching path under the configured work directory.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Offline interview audio analysis
#[derive(Parser, Debug)]
#[command(
    name = "intervox",
    version = crate::version_string(),
    about = "Offline interview audio analysis: diarization, transcription, Q/A pairing, sentiment"
)]
pub struct Cli {
    /// Subcommand to execute (default: run the whole pipeline)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress stage banners and per-stage output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: print resolved stage invocations)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the whole pipeline: diarize, segments, split, transcribe, align, analyze
    Run {
        /// Hugging Face access token for the diarization model
        /// (default: diarization.token from config, then HF_TOKEN)
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
    },

    /// Detect speaker turns in the recording (external diarization model)
    Diarize {
        /// Input WAV recording (default: <work_dir>/raw/audio.wav)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output RTTM file (default: <work_dir>/interim/audio.rttm)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Hugging Face access token
        /// (default: diarization.token from config, then HF_TOKEN)
        #[arg(long, value_name = "TOKEN")]
        token: Option<String>,
    },

    /// Convert RTTM speaker turns into ordered JSON segments
    Segments {
        /// Input RTTM file (default: <work_dir>/interim/audio.rttm)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output segments JSON (default: <work_dir>/output/segments.json)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Cut the recording into one WAV clip per segment
    Split {
        /// Source WAV recording (default: <work_dir>/raw/audio.wav)
        #[arg(long, value_name = "FILE")]
        audio: Option<PathBuf>,

        /// Segments JSON (default: <work_dir>/output/segments.json)
        #[arg(long, value_name = "FILE")]
        segments: Option<PathBuf>,

        /// Directory for the extracted clips (default: <work_dir>/output/clips)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },

    /// Transcribe each extracted clip (external speech-to-text model)
    Transcribe {
        /// Directory containing part_<n>.wav clips (default: <work_dir>/output/clips)
        #[arg(long, value_name = "DIR")]
        clips: Option<PathBuf>,

        /// Output transcripts JSON (default: <work_dir>/output/transcripts.json)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Join segments with their transcripts into speaker turns
    Align {
        /// Segments JSON (default: <work_dir>/output/segments.json)
        #[arg(long, value_name = "FILE")]
        segments: Option<PathBuf>,

        /// Transcripts JSON (default: <work_dir>/output/transcripts.json)
        #[arg(long, value_name = "FILE")]
        transcripts: Option<PathBuf>,

        /// Output turns JSON (default: <work_dir>/output/aligned.json)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Classify roles, pair questions with answers, score sentiment
    Analyze {
        /// Input turns JSON (default: <work_dir>/output/aligned.json)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output analysis JSON (default: <work_dir>/output/analysis.json)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Check external dependencies
    Check,

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value by key (e.g., transcription.program)
    Get {
        /// Dotted key path (e.g., diarization.program, paths.work_dir)
        key: String,
    },
    /// Set a configuration value by key
    Set {
        /// Dotted key path (e.g., diarization.program, paths.work_dir)
        key: String,
        /// Value to set
        value: String,
    },
    /// List current configuration values (optionally one section)
    List {
        /// Config section to show (e.g., paths, diarization, transcription, analysis)
        key: Option<String>,
    },
    /// Dump a commented configuration template
    Dump,
}
