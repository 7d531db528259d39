//! Ordered rule matching over ranked categories.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classifier::Classification;
use super::rules::{Category, CategoryId, CategoryRegistry, ExtractedValue, FieldExtractor};

/// A successful rule extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub category: CategoryId,
    /// Name of the producing rule.
    pub rule: String,
    /// Byte span of the matched text.
    pub span: (usize, usize),
    /// Matched text, verbatim.
    pub raw: String,
    /// Normalized value.
    pub value: ExtractedValue,
    pub confidence: f32,
}

/// Tries category rules in priority order; the first match wins.
#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher<'r> {
    registry: &'r CategoryRegistry,
    max_categories: usize,
    min_retry_score_ratio: f32,
}

impl<'r> PatternMatcher<'r> {
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self {
            registry,
            max_categories: 2,
            min_retry_score_ratio: 0.5,
        }
    }

    /// Set how many ranked categories are tried.
    pub fn with_max_categories(mut self, max_categories: usize) -> Self {
        self.max_categories = max_categories.max(1);
        self
    }

    /// Set the minimum score, relative to the top category, for a lower
    /// ranked category to be tried.
    pub fn with_min_retry_score_ratio(mut self, ratio: f32) -> Self {
        self.min_retry_score_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Categories the matcher will try for a classification, in order.
    pub fn candidates<'c>(
        &self,
        classification: &'c Classification,
    ) -> impl Iterator<Item = CategoryId> + 'c {
        let top_score = classification.top().map(|s| s.score).unwrap_or(0) as f32;
        let threshold = top_score * self.min_retry_score_ratio;

        classification
            .ranking
            .iter()
            .take(self.max_categories)
            .filter(move |s| s.score as f32 >= threshold)
            .map(|s| s.category)
    }

    /// Run the rules of each candidate category against `text`.
    pub fn find(&self, text: &str, classification: &Classification) -> Option<Match> {
        for id in self.candidates(classification) {
            let Some(category) = self.registry.get(id) else {
                continue;
            };

            if let Some(found) = self.match_category(category, text) {
                return Some(found);
            }
            debug!("No rule matched for category {}", id);
        }
        None
    }

    /// First matching rule of a single category.
    pub fn match_category(&self, category: &Category, text: &str) -> Option<Match> {
        category.rules().iter().find_map(|rule| {
            rule.extract(text).map(|m| {
                debug!(
                    "Rule {}/{} matched at {:?}: {}",
                    category.id(),
                    rule.name(),
                    m.position,
                    m.value
                );
                Match {
                    category: category.id(),
                    rule: rule.name().to_string(),
                    span: m.position,
                    raw: m.source,
                    value: m.value,
                    confidence: m.confidence,
                }
            })
        })
    }
}
