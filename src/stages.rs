//! Stage entry points: file I/O around the core modules.
//!
//! Each function backs one CLI subcommand. The orchestrator re-invokes the
//! current executable with these subcommands, so every stage reads its input
//! files, applies the corresponding module, and writes the output file the
//! next stage expects.

use crate::align::align_turns;
use crate::analysis::report::print_summary;
use crate::analysis::{ConversationAnalysisEngine, LexiconScorer};
use crate::audio::cut_clips;
use crate::config::Config;
use crate::diarize::{SpeakerDiarizer, resolve_token};
use crate::error::Result;
use crate::rttm;
use crate::transcribe::ClipTranscriber;
use crate::transcript::{self, Segment, TranscribedClip, Turn};
use owo_colors::OwoColorize;
use std::path::Path;

/// Diarize the input WAV into an RTTM file.
pub fn run_diarize(
    config: &Config,
    input: &Path,
    output: &Path,
    token_flag: Option<&str>,
) -> Result<()> {
    let token = resolve_token(token_flag, config)?;
    let diarizer = SpeakerDiarizer::from_config(config);
    diarizer.diarize(input, output, &token)?;
    println!("{} {}", "RTTM written:".green(), output.display());
    Ok(())
}

/// Convert an RTTM file into the ordered segments JSON.
pub fn run_segments(rttm_path: &Path, output: &Path) -> Result<()> {
    let segments = rttm::load_rttm(rttm_path)?;
    println!(
        "parsed {} segments from {}",
        segments.len(),
        rttm_path.display()
    );
    transcript::save_json(output, &segments)?;
    println!("{} {}", "segments written:".green(), output.display());
    Ok(())
}

/// Cut the input WAV into one clip per diarization segment.
pub fn run_split(audio_path: &Path, segments_path: &Path, clips_dir: &Path) -> Result<()> {
    let segments: Vec<Segment> = transcript::load_json_array(segments_path)?;
    let written = cut_clips(audio_path, &segments, clips_dir)?;
    println!(
        "{} {} clips in {}",
        "exported:".green(),
        written.len(),
        clips_dir.display()
    );
    Ok(())
}

/// Transcribe every clip in the directory into the transcripts JSON.
pub fn run_transcribe(config: &Config, clips_dir: &Path, output: &Path) -> Result<()> {
    let transcriber = ClipTranscriber::from_config(config);
    let clips = transcriber.transcribe_dir(clips_dir)?;
    transcript::save_json(output, &clips)?;
    println!("{} {}", "transcripts written:".green(), output.display());
    Ok(())
}

/// Join segments and transcripts positionally into the turns JSON.
pub fn run_align(segments_path: &Path, transcripts_path: &Path, output: &Path) -> Result<()> {
    let segments: Vec<Segment> = transcript::load_json_array(segments_path)?;
    let clips: Vec<TranscribedClip> = transcript::load_json_array(transcripts_path)?;
    let turns = align_turns(&segments, clips);
    transcript::save_json(output, &turns)?;
    println!(
        "{} {} turns -> {}",
        "aligned:".green(),
        turns.len(),
        output.display()
    );
    Ok(())
}

/// Analyze the turn list into the final annotated document.
///
/// Both sentiment lexicons are loaded up front; a missing or corrupt
/// lexicon aborts the stage before any turn is processed.
pub fn run_analyze(config: &Config, turns_path: &Path, output: &Path) -> Result<()> {
    let turns: Vec<Turn> = transcript::load_json_array(turns_path)?;

    let scorer = LexiconScorer::load(&config.lexicon_dir())?;
    let engine = ConversationAnalysisEngine::new(scorer, config.analysis.interview_id.clone());

    if turns.is_empty() {
        eprintln!(
            "{} no turns to analyze; writing empty document",
            "warning:".yellow()
        );
    }

    let document = engine.analyze(&turns);
    transcript::save_json(output, &document)?;
    print_summary(&document);
    println!("{} {}", "analysis written:".green(), output.display());
    Ok(())
}
