//! Error types for intervox.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntervoxError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input boundary errors
    #[error("Audio input not found: place audio.wav or audio.mp3 in {dir}")]
    AudioInputNotFound { dir: String },

    #[error("Audio format error: {message}")]
    AudioFormat { message: String },

    #[error("Clip extraction failed: {message}")]
    ClipExtraction { message: String },

    #[error("Malformed RTTM at line {line}: {message}")]
    RttmFormat { line: usize, message: String },

    #[error("Malformed input file {path}: {message}")]
    InputFormat { path: String, message: String },

    // External collaborator errors
    #[error("Tool not found: {tool}")]
    ToolNotFound { tool: String },

    #[error("{program} failed: {message}")]
    CommandFailed { program: String, message: String },

    #[error("Missing diarization credential: set {variable} or configure diarization.token")]
    CredentialMissing { variable: String },

    #[error("Model unavailable ({name}): {message}")]
    ModelUnavailable { name: String, message: String },

    #[error("Stage {stage} failed: {message}")]
    StageInvocation { stage: String, message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, IntervoxError>;
