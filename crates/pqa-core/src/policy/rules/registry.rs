//! Category registry: the immutable table of answer categories.

use std::collections::HashSet;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::table::BUILTIN_CATEGORIES;
use super::{Rule, RuleSpec};
use crate::document::text::normalize_question;
use crate::error::PatternError;

lazy_static! {
    static ref BUILTIN: CategoryRegistry = CategoryRegistry::from_specs(BUILTIN_CATEGORIES)
        .expect("built-in category table is valid");
}

/// Identifier of an answer category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryId {
    GracePeriod,
    PedWaitingPeriod,
    Maternity,
    CataractWaiting,
    OrganDonor,
    Ncd,
    PreventiveCheckup,
    HospitalDefinition,
    Ayush,
    RoomRentLimit,
}

impl CategoryId {
    pub const ALL: [CategoryId; 10] = [
        Self::GracePeriod,
        Self::PedWaitingPeriod,
        Self::Maternity,
        Self::CataractWaiting,
        Self::OrganDonor,
        Self::Ncd,
        Self::PreventiveCheckup,
        Self::HospitalDefinition,
        Self::Ayush,
        Self::RoomRentLimit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GracePeriod => "grace_period",
            Self::PedWaitingPeriod => "ped_waiting_period",
            Self::Maternity => "maternity",
            Self::CataractWaiting => "cataract_waiting",
            Self::OrganDonor => "organ_donor",
            Self::Ncd => "ncd",
            Self::PreventiveCheckup => "preventive_checkup",
            Self::HospitalDefinition => "hospital_definition",
            Self::Ayush => "ayush",
            Self::RoomRentLimit => "room_rent_limit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a category, as written in a table.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub id: CategoryId,
    pub label: &'static str,
    /// Distinctive phrases: scored by the classifier and used as fallback anchors.
    pub keywords: &'static [&'static str],
    /// Supporting words: scored by the classifier only.
    pub terms: &'static [&'static str],
    /// Answer template with a `{value}` placeholder.
    pub template: &'static str,
    /// Rules, most specific first.
    pub rules: &'static [RuleSpec],
}

/// A keyword in both of its compiled forms.
#[derive(Debug, Clone)]
pub struct Keyword {
    /// Normalized form matched against normalized questions.
    pub phrase: String,
    /// Case-insensitive whole-word pattern matched against document text.
    pub pattern: Regex,
}

impl Keyword {
    fn compile(raw: &str) -> Result<Self, regex::Error> {
        let phrase = normalize_question(raw);
        let words: Vec<String> = phrase.split(' ').map(regex::escape).collect();
        let pattern = Regex::new(&format!(
            r"(?i)\b{}(?:s|es)?\b",
            words.join(r"[\s\-]+")
        ))?;
        Ok(Self { phrase, pattern })
    }
}

/// A compiled answer category.
#[derive(Debug, Clone)]
pub struct Category {
    id: CategoryId,
    label: String,
    keywords: Vec<Keyword>,
    terms: Vec<String>,
    template: String,
    rules: Vec<Rule>,
}

impl Category {
    /// Compile a category from its static definition.
    pub fn compile(spec: &CategorySpec) -> Result<Self, PatternError> {
        let name = spec.id.as_str();

        let keywords = spec
            .keywords
            .iter()
            .filter(|k| !normalize_question(k).is_empty())
            .map(|k| {
                Keyword::compile(k).map_err(|e| PatternError::InvalidRegex {
                    category: name.to_string(),
                    rule: format!("keyword '{}'", k),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if keywords.is_empty() {
            return Err(PatternError::NoKeywords(name.to_string()));
        }

        let terms = spec
            .terms
            .iter()
            .map(|t| normalize_question(t))
            .filter(|t| !t.is_empty())
            .collect();

        let rules = spec
            .rules
            .iter()
            .map(|r| Rule::compile(name, r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: spec.id,
            label: spec.label.to_string(),
            keywords,
            terms,
            template: spec.template.to_string(),
            rules,
        })
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Ordered, read-only set of categories.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// The built-in insurance policy categories, compiled once per process.
    pub fn builtin() -> &'static CategoryRegistry {
        &BUILTIN
    }

    /// Compile a registry from a table. Table order is registry order.
    pub fn from_specs(specs: &[CategorySpec]) -> Result<Self, PatternError> {
        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(specs.len());

        for spec in specs {
            if !seen.insert(spec.id) {
                return Err(PatternError::DuplicateCategory(spec.id.to_string()));
            }
            categories.push(Category::compile(spec)?);
        }

        Ok(Self { categories })
    }

    /// All categories in registry order.
    pub fn all_categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
