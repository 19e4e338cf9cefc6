//! Conversation language selection.
//!
//! The analysis understands English and Spanish. The language is picked once
//! per run from the whole transcript and passed down explicitly; nothing in
//! the engine consults it as global state.

use std::collections::HashSet;

use crate::defaults;

/// Languages the role and sentiment analysis can operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
}

/// Common English function words used as detection evidence.
const ENGLISH_FUNCTION_WORDS: [&str; 14] = [
    "the", "a", "is", "are", "i", "you", "he", "she", "it", "we", "they", "to", "of", "and",
];

/// Interrogative markers that open English questions.
const INTERROGATIVES_EN: [&str; 7] = ["what", "how", "when", "where", "why", "which", "who"];

/// Interrogative markers that open Spanish questions.
const INTERROGATIVES_ES: [&str; 7] = [
    "qué", "cómo", "cuándo", "donde", "por qué", "cuál", "quién",
];

impl Language {
    /// Detect the conversation language from the concatenated transcript.
    ///
    /// Counts how many DISTINCT words of the English function-word list occur
    /// as whole lower-cased tokens. More than the threshold means English;
    /// everything else is treated as Spanish.
    pub fn detect<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let full_text = texts
            .into_iter()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(" ");
        let tokens: HashSet<&str> = full_text.split_whitespace().collect();

        let found = ENGLISH_FUNCTION_WORDS
            .iter()
            .filter(|word| tokens.contains(**word))
            .count();

        if found > defaults::ENGLISH_WORD_THRESHOLD {
            Language::English
        } else {
            Language::Spanish
        }
    }

    /// Words that mark a question when they open a turn.
    pub fn interrogatives(&self) -> &'static [&'static str] {
        match self {
            Language::English => &INTERROGATIVES_EN,
            Language::Spanish => &INTERROGATIVES_ES,
        }
    }

    /// Lexicon file name for this language, e.g. "en.tsv".
    pub fn lexicon_file(&self) -> &'static str {
        match self {
            Language::English => "en.tsv",
            Language::Spanish => "es.tsv",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_conversation_is_detected() {
        // Uses all 14 function words, above the threshold of 10
        let texts = vec![
            "the cat is on a mat and it is warm",
            "are you sure he and she went to the store",
            "we know they want some of it",
            "i think you are right",
        ];
        assert_eq!(Language::detect(texts), Language::English);
    }

    #[test]
    fn test_spanish_conversation_falls_through() {
        let texts = vec![
            "hola cómo estás hoy",
            "muy bien gracias por preguntar",
            "qué haces en tu trabajo",
            "trabajo como desarrollador de software",
        ];
        assert_eq!(Language::detect(texts), Language::Spanish);
    }

    #[test]
    fn test_short_english_text_defaults_to_spanish() {
        // Presence-based: a short text cannot reach 11 distinct words
        assert_eq!(Language::detect(vec!["the cat is here"]), Language::Spanish);
    }

    #[test]
    fn test_repeats_do_not_inflate_the_count() {
        let text = "the the the the the the the the the the the the";
        assert_eq!(Language::detect(vec![text]), Language::Spanish);
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let texts = vec![
            "The cat IS on A mat AND it IS warm",
            "ARE you sure HE and SHE went TO the store",
            "WE know THEY want some OF it",
            "I think you are right",
        ];
        assert_eq!(Language::detect(texts), Language::English);
    }

    #[test]
    fn test_empty_input_is_spanish() {
        assert_eq!(Language::detect(Vec::<&str>::new()), Language::Spanish);
    }

    #[test]
    fn test_interrogative_tables() {
        assert!(Language::English.interrogatives().contains(&"what"));
        assert!(Language::Spanish.interrogatives().contains(&"qué"));
        assert_eq!(Language::English.interrogatives().len(), 7);
        assert_eq!(Language::Spanish.interrogatives().len(), 7);
    }

    #[test]
    fn test_lexicon_file_names() {
        assert_eq!(Language::English.lexicon_file(), "en.tsv");
        assert_eq!(Language::Spanish.lexicon_file(), "es.tsv");
    }
}
