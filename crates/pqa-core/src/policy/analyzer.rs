//! Question answering pipeline: classify, match, fall back, format, tally.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::accuracy::tally;
use super::classifier::{Classification, QuestionClassifier};
use super::fallback::ContextFallback;
use super::formatter::AnswerFormatter;
use super::matcher::PatternMatcher;
use super::rules::CategoryRegistry;
use super::{MatchOutcome, QuestionAnswerer};
use crate::document::text::normalize_document;
use crate::models::answer::{AnalysisResult, Answer};
use crate::models::config::EngineConfig;

/// Rule-based policy question answerer.
#[derive(Debug, Clone)]
pub struct PolicyAnalyzer<'r> {
    registry: &'r CategoryRegistry,
    max_categories: usize,
    min_retry_score_ratio: f32,
    enable_fallback: bool,
    fallback_window: usize,
    fallback_confidence: f32,
}

impl PolicyAnalyzer<'static> {
    /// Create an analyzer over the built-in categories with default settings.
    pub fn new() -> Self {
        Self::with_registry(CategoryRegistry::builtin())
    }

    /// Create an analyzer over the built-in categories from configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().with_config(config)
    }
}

impl Default for PolicyAnalyzer<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r> PolicyAnalyzer<'r> {
    /// Create an analyzer over a custom registry.
    pub fn with_registry(registry: &'r CategoryRegistry) -> Self {
        let defaults = EngineConfig::default();
        Self {
            registry,
            max_categories: defaults.max_categories,
            min_retry_score_ratio: defaults.min_retry_score_ratio,
            enable_fallback: defaults.enable_fallback,
            fallback_window: defaults.fallback_window,
            fallback_confidence: defaults.fallback_confidence,
        }
    }

    /// Apply engine configuration.
    pub fn with_config(self, config: &EngineConfig) -> Self {
        self.with_max_categories(config.max_categories)
            .with_min_retry_score_ratio(config.min_retry_score_ratio)
            .with_fallback(config.enable_fallback)
            .with_fallback_window(config.fallback_window)
            .with_fallback_confidence(config.fallback_confidence)
    }

    /// Set how many ranked categories are tried per question.
    pub fn with_max_categories(mut self, max_categories: usize) -> Self {
        self.max_categories = max_categories.max(1);
        self
    }

    /// Set the relative score a lower ranked category needs to be tried.
    pub fn with_min_retry_score_ratio(mut self, ratio: f32) -> Self {
        self.min_retry_score_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Enable or disable keyword context fallback.
    pub fn with_fallback(mut self, enable: bool) -> Self {
        self.enable_fallback = enable;
        self
    }

    /// Set the maximum fallback excerpt length.
    pub fn with_fallback_window(mut self, window: usize) -> Self {
        self.fallback_window = window.max(1);
        self
    }

    /// Set the confidence reported for fallback answers.
    pub fn with_fallback_confidence(mut self, confidence: f32) -> Self {
        self.fallback_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Answer every question against `text`, stamped with `completed_at`.
    pub fn analyze_at<S: AsRef<str>>(
        &self,
        text: &str,
        questions: &[S],
        completed_at: DateTime<Utc>,
    ) -> AnalysisResult {
        let text = normalize_document(text);
        if text.is_empty() {
            warn!("Document text is empty; every answer will be not found");
        }

        let answers: Vec<Answer> = questions
            .iter()
            .map(|q| self.answer_normalized(&text, q.as_ref()))
            .collect();

        let report = tally(&answers);
        info!(
            "Answered {}/{} questions ({:.1}%)",
            report.found_count, report.total_questions, report.accuracy
        );

        AnalysisResult {
            answers,
            found_count: report.found_count,
            total_questions: report.total_questions,
            accuracy: report.accuracy,
            completed_at,
        }
    }

    /// Decide the outcome for one question against normalized text.
    pub fn resolve(&self, text: &str, question: &str) -> MatchOutcome {
        let classification = self.classifier().classify(question);
        self.resolve_classified(text, &classification)
    }

    fn resolve_classified(&self, text: &str, classification: &Classification) -> MatchOutcome {
        let Some(top) = classification.top() else {
            return MatchOutcome::NoMatch;
        };

        if let Some(found) = self.matcher().find(text, classification) {
            return MatchOutcome::Direct(found);
        }

        if self.enable_fallback {
            let fallback = self.registry.get(top.category).and_then(|category| {
                ContextFallback::new(self.fallback_window).find(category, text)
            });
            if let Some(context) = fallback {
                return MatchOutcome::Fallback(context);
            }
        }

        MatchOutcome::NoMatch
    }

    fn answer_normalized(&self, text: &str, question: &str) -> Answer {
        let classification = self.classifier().classify(question);
        if classification.is_unclassified() {
            debug!("Question not classified: {:?}", question);
        }

        let classified = classification.top().map(|s| s.category);
        let outcome = self.resolve_classified(text, &classification);
        let answer = self.formatter().format(question, classified, outcome);

        debug!(
            "{:?} -> {:?} ({:?}, confidence {:.2})",
            question, answer.text, answer.outcome, answer.confidence
        );
        answer
    }

    fn classifier(&self) -> QuestionClassifier<'r> {
        QuestionClassifier::new(self.registry)
    }

    fn matcher(&self) -> PatternMatcher<'r> {
        PatternMatcher::new(self.registry)
            .with_max_categories(self.max_categories)
            .with_min_retry_score_ratio(self.min_retry_score_ratio)
    }

    fn formatter(&self) -> AnswerFormatter<'r> {
        AnswerFormatter::new(self.registry).with_fallback_confidence(self.fallback_confidence)
    }
}

impl QuestionAnswerer for PolicyAnalyzer<'_> {
    fn answer(&self, text: &str, question: &str) -> Answer {
        self.answer_normalized(&normalize_document(text), question)
    }

    fn analyze(&self, text: &str, questions: &[String]) -> AnalysisResult {
        self.analyze_at(text, questions, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::{Outcome, NOT_FOUND_TEXT};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    const POLICY: &str = "Section 2. A grace period of thirty days is allowed for payment of the renewal premium.\n\
        Section 4. Hospital means any institution established for in-patient care and day care \
        treatment of illness and/or injuries.";

    #[test]
    fn test_direct_answer() {
        let answer = PolicyAnalyzer::new().answer(POLICY, "What is the grace period?");

        assert_eq!(answer.text, "Grace period: 30 days");
        assert_eq!(answer.outcome, Outcome::Direct);
        assert_eq!(answer.rule.as_deref(), Some("grace_period_days"));
    }

    #[test]
    fn test_clause_answer() {
        let answer = PolicyAnalyzer::new().answer(POLICY, "How is hospital defined?");

        assert_eq!(
            answer.text,
            "Hospital definition: any institution established for in-patient care and day care treatment of illness and/or injuries"
        );
    }

    #[test]
    fn test_fallback_can_be_disabled() {
        let text = "Cataract surgery has its own sub-section in annexure B.";
        let question = "What is the waiting period for cataract surgery?";

        let with = PolicyAnalyzer::new().answer(text, question);
        assert_eq!(with.outcome, Outcome::Fallback);
        assert_eq!(with.confidence, 0.4);

        let without = PolicyAnalyzer::new().with_fallback(false).answer(text, question);
        assert_eq!(without.text, NOT_FOUND_TEXT);
        assert_eq!(without.category, Some(crate::policy::rules::CategoryId::CataractWaiting));
    }

    #[test]
    fn test_unclassified_question() {
        let answer = PolicyAnalyzer::new().answer(POLICY, "Who is the CEO of the insurer?");
        assert_eq!(answer.outcome, Outcome::NotFound);
        assert_eq!(answer.category, None);
    }

    #[test]
    fn test_analyze_at_is_reproducible() {
        let analyzer = PolicyAnalyzer::new();
        let questions = ["What is the grace period?", "Is maternity covered?"];

        let first = analyzer.analyze_at(POLICY, &questions, fixed_time());
        let second = analyzer.analyze_at(POLICY, &questions, fixed_time());

        assert_eq!(first, second);
        assert_eq!(first.found_count, 1);
        assert_eq!(first.accuracy, 50.0);
        assert_eq!(first.completed_at, fixed_time());
    }

    #[test]
    fn test_empty_document() {
        let result = PolicyAnalyzer::new().analyze_at(" \n ", &["What is the grace period?"], fixed_time());
        assert_eq!(result.found_count, 0);
        assert_eq!(result.accuracy, 0.0);
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig {
            enable_fallback: false,
            fallback_window: 0,
            ..EngineConfig::default()
        };
        let analyzer = PolicyAnalyzer::from_config(&config);

        assert!(!analyzer.enable_fallback);
        assert_eq!(analyzer.fallback_window, 1);
        assert_eq!(analyzer.max_categories, 2);
    }
}
