//! Keyword-anchored context extraction for when no rule matches.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{Category, CategoryId};
use crate::document::text::context_window;

/// Text surrounding a category keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackMatch {
    pub category: CategoryId,
    /// Keyword that anchored the excerpt.
    pub keyword: String,
    /// Byte span of the keyword occurrence.
    pub span: (usize, usize),
    /// Enclosing sentence, or a bounded window around the keyword.
    pub excerpt: String,
}

/// Returns the context of the earliest category keyword in a document.
#[derive(Debug, Clone, Copy)]
pub struct ContextFallback {
    window: usize,
}

impl ContextFallback {
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// Locate the first keyword occurrence of `category` in `text`.
    pub fn find(&self, category: &Category, text: &str) -> Option<FallbackMatch> {
        let (keyword, start, end) = category
            .keywords()
            .iter()
            .filter_map(|k| k.pattern.find(text).map(|m| (k, m.start(), m.end())))
            .min_by_key(|&(_, start, _)| start)?;

        let excerpt = context_window(text, start, end, self.window);
        debug!(
            "Fallback for {}: keyword {:?} at {}, {} byte excerpt",
            category.id(),
            keyword.phrase,
            start,
            excerpt.len()
        );

        Some(FallbackMatch {
            category: category.id(),
            keyword: keyword.phrase.clone(),
            span: (start, end),
            excerpt: excerpt.to_string(),
        })
    }
}

impl Default for ContextFallback {
    fn default() -> Self {
        Self::new(200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::rules::CategoryRegistry;
    use pretty_assertions::assert_eq;

    fn category(id: CategoryId) -> &'static Category {
        CategoryRegistry::builtin().get(id).unwrap()
    }

    #[test]
    fn test_returns_enclosing_sentence() {
        let text = "Scope of cover. A Hospital is any institution established for in-patient care with at least 10 beds. Claims are settled in 30 days.";
        let found = ContextFallback::default()
            .find(category(CategoryId::HospitalDefinition), text)
            .unwrap();

        assert_eq!(
            found.excerpt,
            "A Hospital is any institution established for in-patient care with at least 10 beds."
        );
        assert_eq!(found.keyword, "hospital");
        assert_eq!(&text[found.span.0..found.span.1], "Hospital");
    }

    #[test]
    fn test_earliest_keyword_wins() {
        let text = "Homeopathy is listed in annexure II. AYUSH treatment is covered.";
        let found = ContextFallback::default()
            .find(category(CategoryId::Ayush), text)
            .unwrap();

        assert_eq!(found.keyword, "homeopathy");
        assert_eq!(found.excerpt, "Homeopathy is listed in annexure II.");
    }

    #[test]
    fn test_long_sentence_is_windowed() {
        let text = format!("{} cataract {}", "lorem ipsum ".repeat(40), "dolor sit ".repeat(40));
        let found = ContextFallback::new(80)
            .find(category(CategoryId::CataractWaiting), &text)
            .unwrap();

        assert!(found.excerpt.len() <= 80);
        assert!(found.excerpt.contains("cataract"));
    }

    #[test]
    fn test_absent_keyword() {
        let text = "This policy covers hospitalisation expenses.";
        assert_eq!(
            ContextFallback::default().find(category(CategoryId::Maternity), text),
            None
        );
    }
}
