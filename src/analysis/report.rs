//! The published analysis document and its summary report.
//!
//! Field names are part of the output contract, including the Spanish
//! `participantes` key that downstream tooling already consumes.

use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

use crate::analysis::role::Role;
use crate::analysis::sentiment::{Sentiment, SentimentLabel, round2};

/// One emitted turn with role, pairing, and sentiment annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTurn {
    /// 1-based position in the INPUT turn list, so ids stay stable even
    /// when empty turns are skipped from the output.
    pub segment_id: usize,
    pub speaker: String,
    pub start: f64,
    pub end: f64,
    pub text: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired_response_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired_response_speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired_question_id: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paired_question_speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

/// Run metadata stamped into the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub date: String,
    pub participantes: Vec<String>,
    pub duration_s: f64,
}

/// Per-label slice of the sentiment distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelStats {
    pub count: usize,
    /// Percentage of all answers, one decimal; 0 when there are no answers.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: LabelStats,
    pub negative: LabelStats,
    pub neutral: LabelStats,
}

/// Aggregate statistics over the emitted turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub total_segments: usize,
    pub total_questions: usize,
    pub total_answers: usize,
    pub sentiment_distribution: SentimentDistribution,
    pub average_sentiment_score: f64,
    pub dominant_sentiment: String,
}

/// The complete analysis output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewDocument {
    pub interview_id: String,
    pub metadata: Metadata,
    pub segments: Vec<AnalyzedTurn>,
    pub report: InterviewReport,
}

impl InterviewReport {
    /// Aggregate the emitted turns into the summary report.
    pub fn build(segments: &[AnalyzedTurn]) -> Self {
        let total_questions = segments
            .iter()
            .filter(|s| s.role == Role::Question)
            .count();
        let answers: Vec<&AnalyzedTurn> =
            segments.iter().filter(|s| s.role == Role::Answer).collect();

        let count_of = |label: SentimentLabel| {
            answers
                .iter()
                .filter(|s| s.sentiment.as_ref().map(|sent| sent.label) == Some(label))
                .count()
        };
        let positive = count_of(SentimentLabel::Positive);
        let negative = count_of(SentimentLabel::Negative);
        let neutral = count_of(SentimentLabel::Neutral);

        let stats = |count: usize| LabelStats {
            count,
            percentage: if answers.is_empty() {
                0.0
            } else {
                round1(100.0 * count as f64 / answers.len() as f64)
            },
        };

        let scores: Vec<f64> = answers
            .iter()
            .filter_map(|s| s.sentiment.as_ref().map(|sent| sent.score))
            .collect();
        let average_sentiment_score = if scores.is_empty() {
            0.5
        } else {
            round2(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        // Ties resolve by the fixed order positive, negative, neutral
        let dominant_sentiment = if answers.is_empty() {
            "N/A".to_string()
        } else {
            let candidates = [
                ("POSITIVE", positive),
                ("NEGATIVE", negative),
                ("NEUTRAL", neutral),
            ];
            candidates
                .iter()
                .fold(candidates[0], |best, candidate| {
                    if candidate.1 > best.1 { *candidate } else { best }
                })
                .0
                .to_string()
        };

        Self {
            total_segments: segments.len(),
            total_questions,
            total_answers: answers.len(),
            sentiment_distribution: SentimentDistribution {
                positive: stats(positive),
                negative: stats(negative),
                neutral: stats(neutral),
            },
            average_sentiment_score,
            dominant_sentiment,
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Print the post-analysis console summary.
pub fn print_summary(document: &InterviewDocument) {
    let report = &document.report;

    println!();
    println!("{}", "=== Interview Summary ===".bold());
    println!("Duration: {}s", document.metadata.duration_s);
    println!("Participants: {}", document.metadata.participantes.join(", "));
    println!("Total segments: {}", report.total_segments);
    println!("Questions: {}", report.total_questions);
    println!("Answers: {}", report.total_answers);

    if report.total_answers > 0 {
        let dist = &report.sentiment_distribution;
        println!();
        println!("{}", "=== Answer Sentiment ===".bold());
        println!(
            "Positive: {} ({}%)",
            dist.positive.count.green(),
            dist.positive.percentage
        );
        println!(
            "Negative: {} ({}%)",
            dist.negative.count.red(),
            dist.negative.percentage
        );
        println!(
            "Neutral: {} ({}%)",
            dist.neutral.count,
            dist.neutral.percentage
        );
        println!("Average score: {}", report.average_sentiment_score);
        println!("Dominant sentiment: {}", report.dominant_sentiment.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(id: usize, role: Role, sentiment: Option<Sentiment>) -> AnalyzedTurn {
        AnalyzedTurn {
            segment_id: id,
            speaker: "Interviewee".to_string(),
            start: 0.0,
            end: 1.0,
            text: "text".to_string(),
            role,
            paired_response_id: None,
            paired_response_speaker: None,
            paired_question_id: None,
            paired_question_speaker: None,
            sentiment,
        }
    }

    fn answer(id: usize, polarity: f64) -> AnalyzedTurn {
        turn(id, Role::Answer, Some(Sentiment::from_polarity(polarity)))
    }

    #[test]
    fn test_counts_and_percentages() {
        let segments = vec![
            turn(1, Role::Question, None),
            answer(2, 0.8),  // positive, 0.9
            answer(3, -0.6), // negative, 0.2
            turn(4, Role::Question, None),
            answer(5, 0.9),  // positive, 0.95
            answer(6, 0.0),  // neutral, 0.5
        ];

        let report = InterviewReport::build(&segments);

        assert_eq!(report.total_segments, 6);
        assert_eq!(report.total_questions, 2);
        assert_eq!(report.total_answers, 4);
        assert_eq!(report.sentiment_distribution.positive.count, 2);
        assert_eq!(report.sentiment_distribution.positive.percentage, 50.0);
        assert_eq!(report.sentiment_distribution.negative.count, 1);
        assert_eq!(report.sentiment_distribution.negative.percentage, 25.0);
        assert_eq!(report.sentiment_distribution.neutral.count, 1);
        assert_eq!(report.sentiment_distribution.neutral.percentage, 25.0);
        // (0.9 + 0.2 + 0.95 + 0.5) / 4 = 0.6375 -> 0.64
        assert_eq!(report.average_sentiment_score, 0.64);
        assert_eq!(report.dominant_sentiment, "POSITIVE");
    }

    #[test]
    fn test_no_answers_uses_documented_defaults() {
        let segments = vec![turn(1, Role::Question, None), turn(2, Role::Question, None)];

        let report = InterviewReport::build(&segments);

        assert_eq!(report.total_answers, 0);
        assert_eq!(report.sentiment_distribution.positive.percentage, 0.0);
        assert_eq!(report.average_sentiment_score, 0.5);
        assert_eq!(report.dominant_sentiment, "N/A");
    }

    #[test]
    fn test_empty_input_report() {
        let report = InterviewReport::build(&[]);
        assert_eq!(report.total_segments, 0);
        assert_eq!(report.dominant_sentiment, "N/A");
        assert_eq!(report.average_sentiment_score, 0.5);
    }

    #[test]
    fn test_dominant_tie_prefers_positive_then_negative() {
        let segments = vec![answer(1, 0.8), answer(2, -0.8)];
        let report = InterviewReport::build(&segments);
        assert_eq!(report.dominant_sentiment, "POSITIVE");

        let segments = vec![answer(1, -0.8), answer(2, 0.0)];
        let report = InterviewReport::build(&segments);
        assert_eq!(report.dominant_sentiment, "NEGATIVE");
    }

    #[test]
    fn test_one_third_percentage_rounds_to_one_decimal() {
        let segments = vec![answer(1, 0.8), answer(2, -0.8), answer(3, 0.0)];
        let report = InterviewReport::build(&segments);
        assert_eq!(report.sentiment_distribution.positive.percentage, 33.3);
    }

    #[test]
    fn test_pairing_fields_are_omitted_when_absent() {
        let json = serde_json::to_string(&turn(1, Role::Question, None)).unwrap();
        assert!(!json.contains("paired_response_id"));
        assert!(!json.contains("sentiment"));

        let mut paired = turn(2, Role::Question, None);
        paired.paired_response_id = Some(3);
        paired.paired_response_speaker = Some("Interviewee".to_string());
        let json = serde_json::to_string(&paired).unwrap();
        assert!(json.contains("\"paired_response_id\":3"));
    }

    #[test]
    fn test_document_serializes_contract_keys() {
        let document = InterviewDocument {
            interview_id: "ent_001".to_string(),
            metadata: Metadata {
                date: "2024-05-01".to_string(),
                participantes: vec!["Interviewer".to_string(), "Interviewee".to_string()],
                duration_s: 42.5,
            },
            segments: Vec::new(),
            report: InterviewReport::build(&[]),
        };

        let json = serde_json::to_string(&document).unwrap();
        assert!(json.contains("\"interview_id\":\"ent_001\""));
        assert!(json.contains("\"participantes\""));
        assert!(json.contains("\"duration_s\":42.5"));
        assert!(json.contains("\"sentiment_distribution\""));
        assert!(json.contains("\"dominant_sentiment\":\"N/A\""));
    }
}
