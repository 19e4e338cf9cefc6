//! Audio input handling: format conversion and per-segment clip extraction.

pub mod clip;
pub mod convert;

pub use clip::{cut_clips, wav_duration_secs};
pub use convert::ensure_wav;
