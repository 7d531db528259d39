//! Answer and analysis result models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::policy::rules::CategoryId;

/// Text of every answer that could not be found.
pub const NOT_FOUND_TEXT: &str = "Information not found in document";

/// Prefix of answers taken from surrounding text instead of a rule.
pub const BEST_EFFORT_PREFIX: &str = "[Best-effort] ";

/// How an answer was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// A category rule matched.
    Direct,
    /// No rule matched; the text around a category keyword was returned.
    Fallback,
    /// Nothing relevant was found.
    NotFound,
}

/// Answer to a single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// The question as asked.
    pub question: String,

    /// Category the answer came from, if the question was classified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,

    /// Formatted answer text.
    pub text: String,

    /// Whether relevant information was found.
    pub found: bool,

    /// How the answer was produced.
    pub outcome: Outcome,

    /// Name of the rule that matched (direct answers only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl Answer {
    /// A not-found answer. `category` is kept when the question was
    /// classified but the document had nothing on it.
    pub fn not_found(question: impl Into<String>, category: Option<CategoryId>) -> Self {
        Self {
            question: question.into(),
            category,
            text: NOT_FOUND_TEXT.to_string(),
            found: false,
            outcome: Outcome::NotFound,
            rule: None,
            confidence: 0.0,
        }
    }
}

/// Answers for one document and one list of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Answers in question order.
    pub answers: Vec<Answer>,

    /// Number of answers with `found` set.
    pub found_count: usize,

    /// Number of questions asked.
    pub total_questions: usize,

    /// Percentage of questions answered (0.0 - 100.0).
    pub accuracy: f64,

    /// When the analysis finished.
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_answer() {
        let answer = Answer::not_found("Is dental covered?", None);

        assert_eq!(answer.text, NOT_FOUND_TEXT);
        assert!(!answer.found);
        assert_eq!(answer.outcome, Outcome::NotFound);
        assert_eq!(answer.confidence, 0.0);
    }

    #[test]
    fn test_answer_json_shape() {
        let answer = Answer::not_found("Q?", Some(CategoryId::Maternity));
        let json = serde_json::to_value(&answer).unwrap();

        assert_eq!(json["category"], "maternity");
        assert_eq!(json["outcome"], "not_found");
        assert!(json.get("rule").is_none());
    }
}
