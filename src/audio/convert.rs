//! Input audio discovery and MP3 to WAV conversion.

use crate::error::{IntervoxError, Result};
use crate::exec::CommandExecutor;
use owo_colors::OwoColorize;
use std::path::Path;

/// Ensure the WAV input exists, converting from MP3 when necessary.
///
/// The WAV path wins when both files are present. Conversion shells out to
/// ffmpeg through the executor. When neither file exists the caller gets an
/// error naming the directory to place input audio in.
pub fn ensure_wav<E: CommandExecutor>(executor: &E, wav: &Path, mp3: &Path) -> Result<()> {
    if wav.exists() {
        println!("WAV input found: {}", wav.display());
        return Ok(());
    }

    if mp3.exists() {
        println!("WAV input missing, converting from MP3...");
        convert_mp3_to_wav(executor, mp3, wav)?;
        println!("{} {}", "converted:".green(), wav.display());
        return Ok(());
    }

    let dir = wav.parent().unwrap_or_else(|| Path::new("."));
    Err(IntervoxError::AudioInputNotFound {
        dir: dir.display().to_string(),
    })
}

fn convert_mp3_to_wav<E: CommandExecutor>(executor: &E, mp3: &Path, wav: &Path) -> Result<()> {
    let mp3_str = mp3.display().to_string();
    let wav_str = wav.display().to_string();

    executor
        .execute("ffmpeg", &["-y", "-i", &mp3_str, &wav_str])
        .map_err(|e| match &e {
            IntervoxError::ToolNotFound { tool } if tool == "ffmpeg" => {
                IntervoxError::AudioFormat {
                    message: "ffmpeg not found. Install ffmpeg:\n\
                        Ubuntu/Debian: sudo apt install ffmpeg\n\
                        Arch: sudo pacman -S ffmpeg"
                        .to_string(),
                }
            }
            _ => e,
        })?;

    Ok(())
}
