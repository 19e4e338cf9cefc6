//! Default configuration constants for intervox.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Default diarization command.
///
/// Any executable that accepts an input WAV path and an output RTTM path as
/// its last two arguments works here. The stock setup shells out to a
/// pyannote wrapper script installed alongside the models.
pub const DIARIZER_PROGRAM: &str = "pyannote-audio";

/// Environment variable holding the diarization model credential.
///
/// The gated speaker-diarization checkpoint requires a Hugging Face access
/// token. The token is forwarded to the child process environment, never
/// logged and never written to disk by intervox itself.
pub const CREDENTIAL_VAR: &str = "HF_TOKEN";

/// Default per-clip transcription command.
///
/// Invoked once per clip with the clip path appended; the transcript is read
/// from stdout. whisper-cli with a local model file is the stock choice.
pub const TRANSCRIBER_PROGRAM: &str = "whisper-cli";

/// Minimum clip duration in seconds worth sending to the transcriber.
///
/// Clips below this are diarization noise; they still produce an entry with
/// empty text so positional alignment stays intact.
pub const MIN_CLIP_SECS: f64 = 0.1;

/// File name for the raw input recording, WAV form.
pub const RAW_WAV: &str = "audio.wav";

/// File name for the raw input recording, MP3 form (converted on demand).
pub const RAW_MP3: &str = "audio.mp3";

/// How many distinct English function words must appear in a transcript
/// before the whole conversation is treated as English rather than Spanish.
pub const ENGLISH_WORD_THRESHOLD: usize = 10;

/// Identifier stamped into the analysis document.
pub const INTERVIEW_ID: &str = "ent_001";
