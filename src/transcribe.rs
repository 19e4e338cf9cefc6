//! Clip transcription through the configured external command.
//!
//! Clips are discovered as `part_{n}.wav` files and processed ascending by
//! the index embedded in the filename, so output order never depends on
//! directory iteration order. Clips shorter than the configured minimum
//! duration are skipped with empty text instead of being sent to the
//! transcriber.

use crate::audio::wav_duration_secs;
use crate::config::Config;
use crate::error::{IntervoxError, Result};
use crate::exec::{CommandExecutor, SystemCommandExecutor};
use crate::transcript::TranscribedClip;
use std::path::{Path, PathBuf};

/// Extract the numeric index from a `part_{n}.wav` filename.
fn extract_index(filename: &str) -> Option<u32> {
    filename
        .strip_prefix("part_")?
        .strip_suffix(".wav")?
        .parse()
        .ok()
}

/// List the clips in a directory, ascending by embedded index.
///
/// Files that do not follow the `part_{n}.wav` naming are ignored.
pub fn discover_clips(clips_dir: &Path) -> Result<Vec<(u32, PathBuf)>> {
    let entries = std::fs::read_dir(clips_dir).map_err(|e| IntervoxError::StageInvocation {
        stage: "transcribe".to_string(),
        message: format!("cannot read clips directory {}: {}", clips_dir.display(), e),
    })?;

    let mut clips = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some(index) = extract_index(name) {
            clips.push((index, entry.path()));
        }
    }
    clips.sort_by_key(|(index, _)| *index);
    Ok(clips)
}

/// Runs the external transcription command once per clip.
pub struct ClipTranscriber<E: CommandExecutor> {
    executor: E,
    program: String,
    args: Vec<String>,
    min_clip_secs: f64,
}

impl<E: CommandExecutor> ClipTranscriber<E> {
    pub fn new(
        executor: E,
        program: impl Into<String>,
        args: Vec<String>,
        min_clip_secs: f64,
    ) -> Self {
        Self {
            executor,
            program: program.into(),
            args,
            min_clip_secs,
        }
    }

    /// Transcribe every clip in the directory.
    ///
    /// Returns one entry per discovered clip, in index order. Short clips
    /// keep their index and get empty text.
    pub fn transcribe_dir(&self, clips_dir: &Path) -> Result<Vec<TranscribedClip>> {
        let clips = discover_clips(clips_dir)?;
        let total = clips.len();

        let mut results = Vec::with_capacity(total);
        for (position, (index, path)) in clips.iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            println!("[{}/{}] processing {} ...", position + 1, total, name);

            let duration = wav_duration_secs(path)?;
            if duration < self.min_clip_secs {
                println!("skipped (too short: {:.3}s)", duration);
                results.push(TranscribedClip {
                    index: *index,
                    text: String::new(),
                });
                continue;
            }

            let text = self.transcribe_clip(path)?;
            println!("ok (duration: {:.3}s)", duration);
            results.push(TranscribedClip {
                index: *index,
                text,
            });
        }

        Ok(results)
    }

    /// Invoke the transcriber on one clip; stdout is the transcription.
    fn transcribe_clip(&self, clip: &Path) -> Result<String> {
        let clip_str = clip.display().to_string();
        let mut args: Vec<&str> = self.args.iter().map(String::as_str).collect();
        args.push(&clip_str);

        let stdout = self
            .executor
            .execute(&self.program, &args)
            .map_err(|e| match &e {
                IntervoxError::ToolNotFound { tool } => IntervoxError::StageInvocation {
                    stage: "transcribe".to_string(),
                    message: format!(
                        "{} not found; install it or set transcription.program",
                        tool
                    ),
                },
                _ => e,
            })?;

        Ok(stdout.trim().to_string())
    }
}

impl ClipTranscriber<SystemCommandExecutor> {
    /// Create a transcriber from the configured program and arguments.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SystemCommandExecutor::new(),
            config.transcription.program.clone(),
            config.transcription.args.clone(),
            config.transcription.min_clip_secs,
        )
    }
}
