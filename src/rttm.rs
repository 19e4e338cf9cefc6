//! RTTM parsing.
//!
//! Diarization writes one `SPEAKER` line per turn in the Rich Transcription
//! Time Marked convention: whitespace-separated fields with the start time
//! at field 3, the duration at field 4, and the speaker label at field 7.

use std::fs;
use std::path::Path;

use crate::error::{IntervoxError, Result};
use crate::transcript::Segment;

const START_FIELD: usize = 3;
const DURATION_FIELD: usize = 4;
const SPEAKER_FIELD: usize = 7;
const MIN_FIELDS: usize = 8;

/// Parse RTTM content into segments, one per non-blank line.
pub fn parse_rttm(contents: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_no = idx + 1;

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return Err(IntervoxError::RttmFormat {
                line: line_no,
                message: format!(
                    "expected at least {MIN_FIELDS} fields, found {}",
                    fields.len()
                ),
            });
        }

        let start = parse_time(fields[START_FIELD], line_no, "start")?;
        let duration = parse_time(fields[DURATION_FIELD], line_no, "duration")?;

        segments.push(Segment {
            start,
            end: start + duration,
            speaker: fields[SPEAKER_FIELD].to_string(),
        });
    }

    Ok(segments)
}

/// Read and parse an RTTM file.
pub fn load_rttm(path: &Path) -> Result<Vec<Segment>> {
    let contents = fs::read_to_string(path)?;
    parse_rttm(&contents)
}

fn parse_time(field: &str, line: usize, what: &str) -> Result<f64> {
    field.parse().map_err(|_| IntervoxError::RttmFormat {
        line,
        message: format!("{what} '{field}' is not a number"),
    })
}
