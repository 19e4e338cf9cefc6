//! The conversation analysis engine.
//!
//! Consumes the ordered, speaker-attributed turns produced by alignment and
//! emits the final annotated document: per-turn roles, cross-speaker
//! question/answer pairing, per-answer sentiment, and the summary report.
//! Processing is strictly sequential and single-pass per concern.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::analysis::language::Language;
use crate::analysis::report::{AnalyzedTurn, InterviewDocument, InterviewReport, Metadata};
use crate::analysis::role::{Role, detect_role};
use crate::analysis::sentiment::{PolarityScorer, Sentiment, round2};
use crate::transcript::Turn;

pub struct ConversationAnalysisEngine<S: PolarityScorer> {
    scorer: S,
    interview_id: String,
}

impl<S: PolarityScorer> ConversationAnalysisEngine<S> {
    pub fn new(scorer: S, interview_id: impl Into<String>) -> Self {
        Self {
            scorer,
            interview_id: interview_id.into(),
        }
    }

    /// Analyze the turns, stamping today's date into the metadata.
    pub fn analyze(&self, turns: &[Turn]) -> InterviewDocument {
        self.analyze_with_date(turns, chrono::Local::now().date_naive())
    }

    /// Analyze the turns with an explicit metadata date.
    ///
    /// Deterministic: the same turns and date always produce the same
    /// document, byte for byte once serialized.
    pub fn analyze_with_date(&self, turns: &[Turn], date: NaiveDate) -> InterviewDocument {
        let date = date.format("%Y-%m-%d").to_string();

        if turns.is_empty() {
            return InterviewDocument {
                interview_id: self.interview_id.clone(),
                metadata: Metadata {
                    date,
                    participantes: Vec::new(),
                    duration_s: 0.0,
                },
                segments: Vec::new(),
                report: InterviewReport::build(&[]),
            };
        }

        let speakers = assign_speaker_roles(turns);
        let language = Language::detect(turns.iter().map(|t| t.transcription.as_str()));

        // Duration spans the whole input, empty turns included
        let first = &turns[0];
        let last = &turns[turns.len() - 1];
        let duration_s = round2(last.end - first.start);

        let mut segments = Vec::new();
        for (idx, turn) in turns.iter().enumerate() {
            if turn.is_empty_text() {
                // Skipped from the output, but keeps its input position
                continue;
            }

            let role = detect_role(&turn.transcription, language);
            let mut analyzed = AnalyzedTurn {
                segment_id: idx + 1,
                speaker: display_name(&speakers, &turn.speaker),
                start: round2(turn.start),
                end: round2(turn.end),
                text: turn.transcription.clone(),
                role,
                paired_response_id: None,
                paired_response_speaker: None,
                paired_question_id: None,
                paired_question_speaker: None,
                sentiment: None,
            };

            match role {
                Role::Question => {
                    // First later cross-speaker turn with text is the response
                    for (future_idx, future) in turns.iter().enumerate().skip(idx + 1) {
                        if future.speaker != turn.speaker && !future.is_empty_text() {
                            analyzed.paired_response_id = Some(future_idx + 1);
                            analyzed.paired_response_speaker =
                                Some(display_name(&speakers, &future.speaker));
                            break;
                        }
                    }
                }
                Role::Answer => {
                    // The single candidate is the nearest prior cross-speaker
                    // turn with text; it pairs only if it reads as a question
                    for past_idx in (0..idx).rev() {
                        let past = &turns[past_idx];
                        if past.speaker != turn.speaker && !past.is_empty_text() {
                            if detect_role(&past.transcription, language) == Role::Question {
                                analyzed.paired_question_id = Some(past_idx + 1);
                                analyzed.paired_question_speaker =
                                    Some(display_name(&speakers, &past.speaker));
                            }
                            break;
                        }
                    }

                    let polarity = self.scorer.polarity(&turn.transcription, language);
                    analyzed.sentiment = Some(Sentiment::from_polarity(polarity));
                }
            }

            segments.push(analyzed);
        }

        let report = InterviewReport::build(&segments);
        InterviewDocument {
            interview_id: self.interview_id.clone(),
            metadata: Metadata {
                date,
                participantes: speakers.iter().map(|(_, name)| name.clone()).collect(),
                duration_s,
            },
            segments,
            report,
        }
    }
}

/// Map raw speaker labels to display names, fewest turns first.
///
/// The speaker with the fewest turns is the Interviewer; everyone else is an
/// Interviewee. Order is deterministic: first appearance, then a stable sort
/// by turn count, so repeated runs list participants identically.
fn assign_speaker_roles(turns: &[Turn]) -> Vec<(String, String)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for turn in turns {
        if !counts.contains_key(turn.speaker.as_str()) {
            order.push(turn.speaker.clone());
        }
        *counts.entry(turn.speaker.as_str()).or_insert(0) += 1;
    }

    order.sort_by_key(|speaker| counts[speaker.as_str()]);

    order
        .into_iter()
        .enumerate()
        .map(|(rank, raw)| {
            let display = if rank == 0 { "Interviewer" } else { "Interviewee" };
            (raw, display.to_string())
        })
        .collect()
}

fn display_name(speakers: &[(String, String)], raw: &str) -> String {
    speakers
        .iter()
        .find(|(label, _)| label == raw)
        .map(|(_, name)| name.clone())
        .unwrap_or_else(|| raw.to_string())
}
