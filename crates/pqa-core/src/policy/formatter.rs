//! Rendering of match outcomes into answers.

use super::MatchOutcome;
use super::rules::{CategoryId, CategoryRegistry};
use crate::models::answer::{Answer, Outcome, BEST_EFFORT_PREFIX};

/// Placeholder replaced by the extracted value in category templates.
pub const VALUE_PLACEHOLDER: &str = "{value}";

/// Substitute `value` into a category template.
pub fn render(template: &str, value: &str) -> String {
    template.replace(VALUE_PLACEHOLDER, value)
}

/// Turns match outcomes into [`Answer`]s.
#[derive(Debug, Clone, Copy)]
pub struct AnswerFormatter<'r> {
    registry: &'r CategoryRegistry,
    fallback_confidence: f32,
}

impl<'r> AnswerFormatter<'r> {
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self {
            registry,
            fallback_confidence: 0.4,
        }
    }

    /// Set the confidence reported for fallback answers.
    pub fn with_fallback_confidence(mut self, confidence: f32) -> Self {
        self.fallback_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Format the answer to `question`. `classified` is the top category of
    /// the question and is reported on not-found answers.
    pub fn format(
        &self,
        question: &str,
        classified: Option<CategoryId>,
        outcome: MatchOutcome,
    ) -> Answer {
        match outcome {
            MatchOutcome::Direct(found) => {
                let value = found.value.to_string();
                let text = match self.registry.get(found.category) {
                    Some(category) => render(category.template(), &value),
                    None => value,
                };
                Answer {
                    question: question.to_string(),
                    category: Some(found.category),
                    text,
                    found: true,
                    outcome: Outcome::Direct,
                    rule: Some(found.rule),
                    confidence: found.confidence,
                }
            }
            MatchOutcome::Fallback(context) => Answer {
                question: question.to_string(),
                category: Some(context.category),
                text: format!("{}{}", BEST_EFFORT_PREFIX, context.excerpt),
                found: true,
                outcome: Outcome::Fallback,
                rule: None,
                confidence: self.fallback_confidence,
            },
            MatchOutcome::NoMatch => Answer::not_found(question, classified),
        }
    }
}
