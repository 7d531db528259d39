//! Question classification by keyword overlap.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::text::normalize_question;
use crate::policy::rules::{Category, CategoryId, CategoryRegistry};

/// Score contributed by each distinct keyword found in a question.
pub const KEYWORD_WEIGHT: u32 = 2;
/// Score contributed by each distinct supporting term found in a question.
pub const TERM_WEIGHT: u32 = 1;

/// A category a question was classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredCategory {
    pub category: CategoryId,
    pub score: u32,
}

/// Ranked classification of one question. Empty means unclassified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub ranking: Vec<ScoredCategory>,
}

impl Classification {
    pub fn is_unclassified(&self) -> bool {
        self.ranking.is_empty()
    }

    /// Highest-ranked category, if any.
    pub fn top(&self) -> Option<ScoredCategory> {
        self.ranking.first().copied()
    }
}

/// Maps questions to registry categories.
#[derive(Debug, Clone, Copy)]
pub struct QuestionClassifier<'r> {
    registry: &'r CategoryRegistry,
}

impl<'r> QuestionClassifier<'r> {
    pub fn new(registry: &'r CategoryRegistry) -> Self {
        Self { registry }
    }

    /// Rank categories by score, descending; registry order breaks ties.
    pub fn classify(&self, question: &str) -> Classification {
        let normalized = normalize_question(question);
        if normalized.is_empty() {
            return Classification::default();
        }
        let padded = format!(" {} ", normalized);

        let mut ranking: Vec<(usize, ScoredCategory)> = self
            .registry
            .all_categories()
            .iter()
            .enumerate()
            .filter_map(|(order, category)| {
                let score = score_category(category, &padded);
                (score > 0).then_some((
                    order,
                    ScoredCategory {
                        category: category.id(),
                        score,
                    },
                ))
            })
            .collect();

        ranking.sort_by(|(a_order, a), (b_order, b)| {
            b.score.cmp(&a.score).then(a_order.cmp(b_order))
        });

        let classification = Classification {
            ranking: ranking.into_iter().map(|(_, scored)| scored).collect(),
        };

        debug!(
            "Classified {:?} as {:?}",
            question,
            classification
                .ranking
                .iter()
                .map(|s| (s.category.as_str(), s.score))
                .collect::<Vec<_>>()
        );

        classification
    }
}

fn score_category(category: &Category, padded_question: &str) -> u32 {
    let keywords = category
        .keywords()
        .iter()
        .filter(|k| contains_phrase(padded_question, &k.phrase))
        .count() as u32;

    let terms = category
        .terms()
        .iter()
        .filter(|t| contains_phrase(padded_question, t))
        .count() as u32;

    keywords * KEYWORD_WEIGHT + terms * TERM_WEIGHT
}

/// Whole-word phrase lookup in a space-padded normalized question.
/// A trailing plural "s" or "es" on the last word is accepted, as in
/// document-side keyword patterns.
fn contains_phrase(padded_question: &str, phrase: &str) -> bool {
    ["", "s", "es"]
        .iter()
        .any(|suffix| padded_question.contains(&format!(" {}{} ", phrase, suffix)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(question: &str) -> Classification {
        QuestionClassifier::new(CategoryRegistry::builtin()).classify(question)
    }

    fn top(question: &str) -> Option<CategoryId> {
        classify(question).top().map(|s| s.category)
    }

    #[test]
    fn test_reference_questions() {
        let cases = [
            (
                "What is the grace period for premium payment under the National Parivar Mediclaim Plus Policy?",
                CategoryId::GracePeriod,
            ),
            (
                "What is the waiting period for pre-existing diseases (PED) to be covered?",
                CategoryId::PedWaitingPeriod,
            ),
            (
                "Does this policy cover maternity expenses, and what are the conditions?",
                CategoryId::Maternity,
            ),
            ("What is the waiting period for cataract surgery?", CategoryId::CataractWaiting),
            (
                "Are the medical expenses for an organ donor covered under this policy?",
                CategoryId::OrganDonor,
            ),
            ("What is the No Claim Discount (NCD) offered in this policy?", CategoryId::Ncd),
            ("Is there a benefit for preventive health check-ups?", CategoryId::PreventiveCheckup),
            ("How does the policy define a 'Hospital'?", CategoryId::HospitalDefinition),
            ("What is the extent of coverage for AYUSH treatments?", CategoryId::Ayush),
            (
                "Are there any sub-limits on room rent and ICU charges for Plan A?",
                CategoryId::RoomRentLimit,
            ),
        ];

        for (question, expected) in cases {
            assert_eq!(top(question), Some(expected), "question: {}", question);
        }
    }

    #[test]
    fn test_scores_are_weighted_overlap() {
        let result = classify("What is the grace period for premium payment?");
        assert_eq!(
            result.top(),
            Some(ScoredCategory {
                category: CategoryId::GracePeriod,
                score: 2 * KEYWORD_WEIGHT,
            })
        );
    }

    #[test]
    fn test_keyword_beats_shared_term() {
        // "waiting period" is a term of both PED and cataract; "maternity" is a keyword
        let result = classify("What is the waiting period for maternity?");
        assert_eq!(result.top().map(|s| s.category), Some(CategoryId::Maternity));
        assert!(result.ranking.len() >= 3);
    }

    #[test]
    fn test_ties_follow_registry_order() {
        let result = classify("Is there a waiting period?");
        let ids: Vec<CategoryId> = result.ranking.iter().map(|s| s.category).collect();
        assert_eq!(ids, vec![CategoryId::PedWaitingPeriod, CategoryId::CataractWaiting]);
    }

    #[test]
    fn test_unclassified() {
        assert!(classify("Who won the football match?").is_unclassified());
        assert!(classify("").is_unclassified());
        assert!(classify("???").is_unclassified());
    }

    #[test]
    fn test_whole_word_matching() {
        // "hospitalisation" must not count as "hospital"
        assert_eq!(top("Is hospitalisation abroad possible?"), None);
    }

    #[test]
    fn test_plural_suffixes_match_document_side() {
        assert!(contains_phrase(" are cataracts covered ", "cataract"));
        assert!(contains_phrase(" any sub limites here ", "sub limit"));
        assert!(!contains_phrase(" any sub limiters here ", "sub limit"));
        assert_eq!(top("Are cataracts covered?"), Some(CategoryId::CataractWaiting));

        let keyword = &CategoryRegistry::builtin()
            .get(CategoryId::RoomRentLimit)
            .unwrap()
            .keywords()[3];
        assert_eq!(keyword.phrase, "sub limit");
        assert!(keyword.pattern.is_match("sub-limites"));
    }

    #[test]
    fn test_deterministic() {
        let q = "Are there sub-limits on ICU charges and room rent?";
        assert_eq!(classify(q), classify(q));
    }
}
