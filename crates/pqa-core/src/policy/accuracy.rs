//! Found/total accounting for a batch of answers.

use serde::{Deserialize, Serialize};

use crate::models::answer::Answer;

/// Accuracy of a set of answers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    pub found_count: usize,
    pub total_questions: usize,
    /// Percentage found (0.0 - 100.0).
    pub accuracy: f64,
}

/// Percentage of `found` over `total`. An empty request is fully answered.
pub fn accuracy(found: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    100.0 * found as f64 / total as f64
}

/// Tally found answers.
pub fn tally(answers: &[Answer]) -> AccuracyReport {
    let found_count = answers.iter().filter(|a| a.found).count();
    let total_questions = answers.len();

    AccuracyReport {
        found_count,
        total_questions,
        accuracy: accuracy(found_count, total_questions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::Outcome;

    fn answer(found: bool) -> Answer {
        let mut answer = Answer::not_found("Q?", None);
        if found {
            answer.found = true;
            answer.outcome = Outcome::Direct;
        }
        answer
    }

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(1, 2), 50.0);
        assert_eq!(accuracy(0, 3), 0.0);
        assert_eq!(accuracy(3, 3), 100.0);
        assert_eq!(accuracy(0, 0), 100.0);
    }

    #[test]
    fn test_tally() {
        let report = tally(&[answer(true), answer(false), answer(true), answer(false)]);
        assert_eq!(
            report,
            AccuracyReport {
                found_count: 2,
                total_questions: 4,
                accuracy: 50.0,
            }
        );
    }

    #[test]
    fn test_tally_empty() {
        let report = tally(&[]);
        assert_eq!(report.total_questions, 0);
        assert_eq!(report.accuracy, 100.0);
    }
}
