//! Question/answer role detection.

use serde::{Deserialize, Serialize};

use crate::analysis::language::Language;

/// Conversational role of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Question,
    Answer,
}

/// Classify a turn as question or answer.
///
/// A turn is a question when its trimmed text ends in `?`, or when any of
/// its first three words contains an interrogative marker of the selected
/// language (trailing `?` and `,` are stripped before matching). Everything
/// else is an answer.
pub fn detect_role(text: &str, language: Language) -> Role {
    let lowered = text.to_lowercase();
    let trimmed = lowered.trim();

    if trimmed.ends_with('?') {
        return Role::Question;
    }

    for word in trimmed.split_whitespace().take(3) {
        let cleaned = word.trim_end_matches(['?', ',']);
        if language
            .interrogatives()
            .iter()
            .any(|marker| cleaned.contains(marker))
        {
            return Role::Question;
        }
    }

    Role::Answer
}
