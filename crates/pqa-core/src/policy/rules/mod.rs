//! Rule-based answer extractors for insurance policy text.

pub mod numbers;
pub mod patterns;
pub mod registry;
mod table;

pub use numbers::{parse_number, Quantity, Unit};
pub use registry::{Category, CategoryId, CategoryRegistry, CategorySpec};

use std::fmt;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::document::text::context_window;
use crate::error::PatternError;

/// Longest sentence a [`Capture::Sentence`] rule returns before it is cut
/// down to a window around the match.
const MAX_SENTENCE_LEN: usize = 400;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// Extraction context with confidence scores.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Confidence score (0.0 - 1.0).
    pub confidence: f32,
    /// Byte span of the match in the source text.
    pub position: (usize, usize),
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            value,
            confidence,
            position: (0, 0),
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = (start, end);
        self
    }
}

/// How a rule turns a regex match into an answer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// A number in `group` with a fixed unit.
    Quantity { group: usize, unit: Unit },
    /// A number in `value` with its unit word in `unit`.
    Duration { value: usize, unit: usize },
    /// The trimmed text of `group`, verbatim.
    Clause { group: usize },
    /// The sentence enclosing the whole match.
    Sentence,
}

impl Capture {
    fn highest_group(&self) -> usize {
        match *self {
            Self::Quantity { group, .. } | Self::Clause { group } => group,
            Self::Duration { value, unit } => value.max(unit),
            Self::Sentence => 0,
        }
    }
}

/// Value produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtractedValue {
    Quantity(Quantity),
    Text(String),
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity(q) => write!(f, "{}", q),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// Static description of a rule, as written in a category table.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub name: &'static str,
    /// Pattern with `<num>`/`<gap>`/`<unit>`/`<pct>`/`<echo>` placeholders.
    pub pattern: &'static str,
    pub capture: Capture,
    pub confidence: f32,
}

/// A compiled extraction rule.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    regex: Regex,
    capture: Capture,
    confidence: f32,
}

impl Rule {
    /// Compile a rule definition for `category`.
    pub fn compile(category: &str, spec: &RuleSpec) -> Result<Self, PatternError> {
        let regex = Regex::new(&patterns::expand(spec.pattern)).map_err(|e| {
            PatternError::InvalidRegex {
                category: category.to_string(),
                rule: spec.name.to_string(),
                reason: e.to_string(),
            }
        })?;

        let available = regex.captures_len() - 1;
        let group = spec.capture.highest_group();
        if group > available {
            return Err(PatternError::MissingGroup {
                rule: spec.name.to_string(),
                group,
                available,
            });
        }

        Ok(Self {
            name: spec.name.to_string(),
            regex,
            capture: spec.capture,
            confidence: spec.confidence.clamp(0.0, 1.0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Turn one regex match into a value, or `None` when the captured text
    /// does not normalize (e.g. a number word out of range).
    fn resolve(&self, text: &str, caps: &Captures<'_>) -> Option<ExtractionMatch<ExtractedValue>> {
        let whole = caps.get(0)?;

        let value = match self.capture {
            Capture::Quantity { group, unit } => {
                let amount = parse_number(caps.get(group)?.as_str())?;
                ExtractedValue::Quantity(Quantity::new(amount, unit))
            }
            Capture::Duration { value, unit } => {
                let amount = parse_number(caps.get(value)?.as_str())?;
                let unit = Unit::from_str(caps.get(unit)?.as_str())?;
                ExtractedValue::Quantity(Quantity::new(amount, unit))
            }
            Capture::Clause { group } => {
                let clause = caps
                    .get(group)?
                    .as_str()
                    .trim()
                    .trim_end_matches([',', ';', ':'])
                    .trim();
                if clause.is_empty() {
                    return None;
                }
                ExtractedValue::Text(clause.to_string())
            }
            Capture::Sentence => ExtractedValue::Text(
                context_window(text, whole.start(), whole.end(), MAX_SENTENCE_LEN).to_string(),
            ),
        };

        Some(
            ExtractionMatch::new(value, self.confidence, whole.as_str())
                .with_position(whole.start(), whole.end()),
        )
    }
}

impl FieldExtractor for Rule {
    type Output = ExtractionMatch<ExtractedValue>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let found = self
            .regex
            .captures_iter(text)
            .find_map(|caps| self.resolve(text, &caps));
        trace!("Rule {} matched: {}", self.name, found.is_some());
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(pattern: &'static str, capture: Capture) -> Rule {
        let spec = RuleSpec {
            name: "test",
            pattern,
            capture,
            confidence: 0.9,
        };
        Rule::compile("test", &spec).unwrap()
    }

    #[test]
    fn test_quantity_rule_normalizes_words() {
        let r = rule(
            r"grace period<gap>(<num>)<echo>\s*days?",
            Capture::Quantity { group: 1, unit: Unit::Days },
        );

        let m = r.extract("A Grace Period of thirty (30) days is allowed.").unwrap();
        assert_eq!(m.value, ExtractedValue::Quantity(Quantity::new(30, Unit::Days)));
        assert_eq!(m.value.to_string(), "30 days");
        assert_eq!(m.confidence, 0.9);
    }

    #[test]
    fn test_duration_rule_reads_unit() {
        let r = rule(
            r"cataract<gap>(<num>)\s*(<unit>)",
            Capture::Duration { value: 1, unit: 2 },
        );

        let m = r.extract("Cataract surgery is covered after two years.").unwrap();
        assert_eq!(m.value.to_string(), "2 years");
    }

    #[test]
    fn test_clause_rule_trims() {
        let r = rule(r"hospital means ([^.]+)", Capture::Clause { group: 1 });

        let m = r.extract("Hospital means any institution registered locally, . Next").unwrap();
        assert_eq!(m.value, ExtractedValue::Text("any institution registered locally".into()));
    }

    #[test]
    fn test_sentence_rule_returns_enclosing_sentence() {
        let r = rule(r"maternity<gap>covered", Capture::Sentence);
        let text = "Intro. Maternity expenses are covered after 9 months. Outro.";

        let m = r.extract(text).unwrap();
        assert_eq!(
            m.value.to_string(),
            "Maternity expenses are covered after 9 months."
        );
        assert_eq!(&text[m.position.0..m.position.1], "Maternity expenses are covered");
    }

    #[test]
    fn test_extract_skips_unparseable() {
        let r = rule(r"(\w+) days", Capture::Quantity { group: 1, unit: Unit::Days });

        let m = r.extract("many days, then 15 days, then five days").unwrap();
        assert_eq!(m.value.to_string(), "15 days");
    }

    #[test]
    fn test_thousands_value_is_not_truncated() {
        let r = rule(
            r"after<gap>(<num>)<echo>\s*days",
            Capture::Quantity { group: 1, unit: Unit::Days },
        );

        assert_eq!(r.extract("covered after 1,095 days"), None);
        assert_eq!(
            r.extract("covered after 1,095 days, or after 730 days")
                .map(|m| m.value.to_string()),
            Some("730 days".to_string())
        );
    }

    #[test]
    fn test_compile_rejects_missing_group() {
        let spec = RuleSpec {
            name: "broken",
            pattern: r"grace period",
            capture: Capture::Clause { group: 1 },
            confidence: 0.5,
        };
        let err = Rule::compile("grace_period", &spec).unwrap_err();
        assert!(matches!(err, PatternError::MissingGroup { group: 1, available: 0, .. }));
    }

    #[test]
    fn test_compile_rejects_bad_regex() {
        let spec = RuleSpec {
            name: "broken",
            pattern: r"grace (period",
            capture: Capture::Sentence,
            confidence: 0.5,
        };
        assert!(matches!(
            Rule::compile("grace_period", &spec),
            Err(PatternError::InvalidRegex { .. })
        ));
    }
}
