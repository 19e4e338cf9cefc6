//! Data model shared by the pipeline stages.
//!
//! The stage boundary files are plain JSON arrays so any of the external
//! collaborators can be swapped for another tool that speaks the same
//! format. Deserialization is tolerant: missing fields fall back to
//! defaults rather than failing the whole file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{IntervoxError, Result};

/// One diarized speaker turn, without text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub speaker: String,
}

/// Transcript of one extracted clip, keyed by the clip index.
///
/// Files on disk may list clips in any order; sort by `index` before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscribedClip {
    pub index: u32,
    #[serde(default)]
    pub text: String,
}

/// A segment joined with its transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub transcription: String,
}

impl Turn {
    pub fn new(segment: &Segment, transcription: impl Into<String>) -> Self {
        Self {
            start: segment.start,
            end: segment.end,
            speaker: segment.speaker.clone(),
            transcription: transcription.into(),
        }
    }

    /// Turns with no usable text are skipped by the analysis but still
    /// occupy their position for ids and pairing.
    pub fn is_empty_text(&self) -> bool {
        self.transcription.trim().is_empty()
    }
}

/// Read a JSON array file into typed values.
pub fn load_json_array<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IntervoxError::InputFormat {
                path: path.display().to_string(),
                message: "file not found".to_string(),
            }
        } else {
            IntervoxError::Io(e)
        }
    })?;
    serde_json::from_str(&contents).map_err(|e| IntervoxError::InputFormat {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Write values as a pretty-printed JSON array, creating parent directories.
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(value).map_err(|e| IntervoxError::InputFormat {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    fs::write(path, contents)?;
    Ok(())
}
