//! Positional alignment of diarized segments with clip transcripts.
//!
//! The join is by ordinal position, not by time: segment N gets the text of
//! the clip with the N-th smallest index. A count mismatch between the two
//! inputs is reported but never fatal; unmatched segments get empty text.
//! A dropped clip therefore shifts every later transcript by one. The
//! mismatch warning is the only guard against that.

use owo_colors::OwoColorize;

use crate::transcript::{Segment, TranscribedClip, Turn};

/// Join segments with transcripts by position.
pub fn align_turns(segments: &[Segment], mut clips: Vec<TranscribedClip>) -> Vec<Turn> {
    clips.sort_by_key(|clip| clip.index);

    if clips.len() != segments.len() {
        eprintln!(
            "{} segment/transcript count mismatch: {} segments, {} transcripts",
            "warning:".yellow().bold(),
            segments.len(),
            clips.len()
        );
    }

    segments
        .iter()
        .enumerate()
        .map(|(position, segment)| {
            let text = clips
                .get(position)
                .map(|clip| clip.text.clone())
                .unwrap_or_default();
            Turn::new(segment, text)
        })
        .collect()
}
