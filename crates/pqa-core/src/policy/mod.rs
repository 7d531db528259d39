//! Policy question answering module.

pub mod accuracy;
mod analyzer;
pub mod classifier;
pub mod fallback;
pub mod formatter;
pub mod matcher;
pub mod rules;

pub use analyzer::PolicyAnalyzer;
pub use classifier::{Classification, QuestionClassifier, ScoredCategory};
pub use fallback::{ContextFallback, FallbackMatch};
pub use matcher::{Match, PatternMatcher};

use serde::{Deserialize, Serialize};

use crate::models::answer::{AnalysisResult, Answer};

/// Result of looking for one question's answer in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// A category rule extracted a value.
    Direct(Match),
    /// No rule matched; text around a category keyword stands in.
    Fallback(FallbackMatch),
    /// Nothing relevant in the document, or the question was not classified.
    NoMatch,
}

/// Trait for question answerers.
pub trait QuestionAnswerer {
    /// Answer one question from document text.
    fn answer(&self, text: &str, question: &str) -> Answer;

    /// Answer all questions and aggregate accuracy.
    fn analyze(&self, text: &str, questions: &[String]) -> AnalysisResult;
}
