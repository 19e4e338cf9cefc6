//! Sentiment scoring of answer turns.
//!
//! Polarity comes from an external lexicon-based scorer behind the
//! `PolarityScorer` trait; this module only maps polarity to the published
//! label and score scale. A polarity in [-1, 1] becomes a score in [0, 1]
//! via (polarity + 1) / 2, rounded to two decimals.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::analysis::language::Language;
use crate::error::{IntervoxError, Result};

/// Published sentiment classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

/// Sentiment of one answer turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

impl Sentiment {
    /// Map a polarity in [-1, 1] to a label and a normalized score.
    ///
    /// Polarity above 0.1 is positive, below -0.1 negative, the band in
    /// between neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        let label = if polarity > 0.1 {
            SentimentLabel::Positive
        } else if polarity < -0.1 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Self {
            label,
            score: round2((polarity + 1.0) / 2.0),
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Trait for text polarity scoring.
///
/// This trait allows swapping implementations (real lexicon vs mock).
pub trait PolarityScorer: Send + Sync {
    /// Polarity of `text` in [-1, 1] for the given language.
    fn polarity(&self, text: &str, language: Language) -> f64;
}

/// Implement PolarityScorer for Arc<T> to allow sharing.
impl<T: PolarityScorer> PolarityScorer for Arc<T> {
    fn polarity(&self, text: &str, language: Language) -> f64 {
        (**self).polarity(text, language)
    }
}

/// Lexicon-backed polarity scorer.
///
/// Loads one tab-separated `token<TAB>polarity` file per language up front.
/// Scoring averages the polarities of matched tokens; a text with no match
/// scores 0.0 (neutral).
#[derive(Debug)]
pub struct LexiconScorer {
    english: HashMap<String, f64>,
    spanish: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Load both language lexicons from `dir`.
    ///
    /// Expects `en.tsv` and `es.tsv`; a missing or unparsable file is a
    /// `ModelUnavailable` error naming the path.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(Self {
            english: load_lexicon(dir, Language::English)?,
            spanish: load_lexicon(dir, Language::Spanish)?,
        })
    }

    fn lexicon(&self, language: Language) -> &HashMap<String, f64> {
        match language {
            Language::English => &self.english,
            Language::Spanish => &self.spanish,
        }
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str, language: Language) -> f64 {
        let lexicon = self.lexicon(language);
        let lowered = text.to_lowercase();

        let matched: Vec<f64> = lowered
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter_map(|word| lexicon.get(word).copied())
            .collect();

        if matched.is_empty() {
            return 0.0;
        }
        let average = matched.iter().sum::<f64>() / matched.len() as f64;
        average.clamp(-1.0, 1.0)
    }
}

fn load_lexicon(dir: &Path, language: Language) -> Result<HashMap<String, f64>> {
    let path = dir.join(language.lexicon_file());
    let name = format!("sentiment lexicon ({})", language.display_name());

    let contents = fs::read_to_string(&path).map_err(|_| IntervoxError::ModelUnavailable {
        name: name.clone(),
        message: format!(
            "{} is missing; install the lexicons or point analysis.lexicon_dir at them",
            path.display()
        ),
    })?;

    let mut lexicon = HashMap::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (token, polarity) =
            line.split_once('\t')
                .ok_or_else(|| IntervoxError::ModelUnavailable {
                    name: name.clone(),
                    message: format!(
                        "{} line {}: expected token<TAB>polarity",
                        path.display(),
                        idx + 1
                    ),
                })?;
        let polarity: f64 =
            polarity
                .trim()
                .parse()
                .map_err(|_| IntervoxError::ModelUnavailable {
                    name: name.clone(),
                    message: format!(
                        "{} line {}: polarity '{}' is not a number",
                        path.display(),
                        idx + 1,
                        polarity.trim()
                    ),
                })?;
        lexicon.insert(token.trim().to_lowercase(), polarity);
    }
    Ok(lexicon)
}

/// Mock polarity scorer for testing.
#[derive(Debug, Clone, Default)]
pub struct MockScorer {
    default_polarity: f64,
    by_text: HashMap<String, f64>,
}

impl MockScorer {
    /// Create a mock returning `default_polarity` for every text.
    pub fn new(default_polarity: f64) -> Self {
        Self {
            default_polarity,
            by_text: HashMap::new(),
        }
    }

    /// Configure a specific polarity for one exact text.
    pub fn with_text(mut self, text: &str, polarity: f64) -> Self {
        self.by_text.insert(text.to_string(), polarity);
        self
    }
}

impl PolarityScorer for MockScorer {
    fn polarity(&self, text: &str, _language: Language) -> f64 {
        self.by_text
            .get(text)
            .copied()
            .unwrap_or(self.default_polarity)
    }
}
