//! Conversation analysis: roles, question/answer pairing, sentiment.

pub mod engine;
pub mod language;
pub mod report;
pub mod role;
pub mod sentiment;

pub use engine::ConversationAnalysisEngine;
pub use language::Language;
pub use report::{AnalyzedTurn, InterviewDocument, InterviewReport};
pub use role::Role;
pub use sentiment::{LexiconScorer, PolarityScorer, Sentiment, SentimentLabel};
