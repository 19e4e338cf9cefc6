//! Working directory layout for a single run.
//!
//! Every stage reads and writes well-known files under one work directory:
//!
//! ```text
//! <work_dir>/
//!   raw/audio.wav          input recording (audio.mp3 converted on demand)
//!   interim/audio.rttm     diarization output
//!   output/segments.json   speaker turns without text
//!   output/clips/          one part_<n>.wav per segment
//!   output/transcripts.json
//!   output/aligned.json    turns with text
//!   output/analysis.json   final annotated document
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults;
use crate::error::Result;

/// Resolved locations of every artifact in the work directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub raw_dir: PathBuf,
    pub raw_wav: PathBuf,
    pub raw_mp3: PathBuf,
    pub rttm: PathBuf,
    pub segments: PathBuf,
    pub clips_dir: PathBuf,
    pub transcripts: PathBuf,
    pub aligned: PathBuf,
    pub analysis: PathBuf,
}

impl ProjectPaths {
    pub fn new(work_dir: &Path) -> Self {
        let raw_dir = work_dir.join("raw");
        let interim_dir = work_dir.join("interim");
        let output_dir = work_dir.join("output");
        Self {
            raw_wav: raw_dir.join(defaults::RAW_WAV),
            raw_mp3: raw_dir.join(defaults::RAW_MP3),
            raw_dir,
            rttm: interim_dir.join("audio.rttm"),
            segments: output_dir.join("segments.json"),
            clips_dir: output_dir.join("clips"),
            transcripts: output_dir.join("transcripts.json"),
            aligned: output_dir.join("aligned.json"),
            analysis: output_dir.join("analysis.json"),
        }
    }

    /// Create the raw/interim/output directory skeleton.
    pub fn ensure_layout(&self) -> Result<()> {
        fs::create_dir_all(&self.raw_dir)?;
        if let Some(parent) = self.rttm.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&self.clips_dir)?;
        Ok(())
    }

    /// Remove artifacts of a previous run.
    ///
    /// Clears the interim RTTM, extracted clips, and the four output JSON
    /// files. The raw input recording is left untouched.
    pub fn clean_previous_run(&self) -> Result<()> {
        remove_file_if_present(&self.rttm)?;
        if self.clips_dir.is_dir() {
            for entry in fs::read_dir(&self.clips_dir)? {
                let entry = entry?;
                if entry.file_type()?.is_file() {
                    fs::remove_file(entry.path())?;
                }
            }
        }
        for file in [&self.segments, &self.transcripts, &self.aligned, &self.analysis] {
            remove_file_if_present(file)?;
        }
        Ok(())
    }

    /// Path of the clip extracted for segment `index`.
    pub fn clip(&self, index: usize) -> PathBuf {
        self.clips_dir.join(format!("part_{index}.wav"))
    }
}

fn remove_file_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
