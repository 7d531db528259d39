//! Request and response shapes exchanged with callers.

use serde::{Deserialize, Serialize};

use super::answer::AnalysisResult;

/// Timestamp format used in responses.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A question-answering request: where the document is and what to ask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Document location (path or URL).
    pub documents: String,

    /// Questions to answer.
    pub questions: Vec<String>,
}

/// One question with its answer text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

/// Response returned for an [`AnalysisRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub accuracy: f64,
    pub found_count: usize,
    pub total_questions: usize,
    pub results: Vec<QuestionAnswer>,
    pub timestamp: String,
    pub message: String,
}

impl AnalysisResponse {
    /// Build the response for a completed analysis.
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            success: true,
            accuracy: result.accuracy,
            found_count: result.found_count,
            total_questions: result.total_questions,
            results: result
                .answers
                .iter()
                .map(|a| QuestionAnswer {
                    question: a.question.clone(),
                    answer: a.text.clone(),
                    confidence: None,
                })
                .collect(),
            timestamp: result.completed_at.format(TIMESTAMP_FORMAT).to_string(),
            message: format!(
                "Analysis completed successfully with {:.1}% accuracy",
                result.accuracy
            ),
        }
    }

    /// Include per-answer confidence scores.
    pub fn with_confidence(mut self, result: &AnalysisResult) -> Self {
        for (entry, answer) in self.results.iter_mut().zip(&result.answers) {
            entry.confidence = Some(answer.confidence);
        }
        self
    }
}
