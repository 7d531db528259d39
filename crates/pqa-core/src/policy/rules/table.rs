//! Built-in category table for health insurance policies.
//!
//! Order matters twice: categories are listed in registry order (the final
//! classification tie-break) and each rule list runs from the most specific
//! phrasing to the most generic.

use super::registry::{CategoryId, CategorySpec};
use super::{Capture, RuleSpec, Unit};

pub(super) const BUILTIN_CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        id: CategoryId::GracePeriod,
        label: "Grace period for premium payment",
        keywords: &["grace period"],
        terms: &["premium", "payment", "renewal", "renew"],
        template: "Grace period: {value}",
        rules: &[
            RuleSpec {
                name: "grace_period_days",
                pattern: r"grace\s+period<gap>(<num>)<echo>\s*days?\b",
                capture: Capture::Quantity { group: 1, unit: Unit::Days },
                confidence: 0.95,
            },
            RuleSpec {
                name: "days_of_grace",
                pattern: r"(<num>)<echo>\s*days?\s+(?:of\s+)?grace\b",
                capture: Capture::Quantity { group: 1, unit: Unit::Days },
                confidence: 0.9,
            },
            RuleSpec {
                name: "grace_period_any_unit",
                pattern: r"grace\s+period<gap>(<num>)<echo>\s*(<unit>)\b",
                capture: Capture::Duration { value: 1, unit: 2 },
                confidence: 0.8,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::PedWaitingPeriod,
        label: "Waiting period for pre-existing diseases",
        keywords: &["pre-existing disease", "pre-existing condition", "ped"],
        terms: &["waiting period", "covered", "coverage"],
        template: "Waiting period for pre-existing diseases (PED): {value} of continuous coverage",
        rules: &[
            RuleSpec {
                name: "ped_then_duration",
                pattern: r"pre[\s-]?existing\s+(?:diseases?|conditions?|illness(?:es)?|ailments?)<gap>(<num>)<echo>\s*(<unit>)\b",
                capture: Capture::Duration { value: 1, unit: 2 },
                confidence: 0.95,
            },
            RuleSpec {
                name: "duration_then_ped",
                pattern: r"(<num>)<echo>\s*(<unit>)<gap>pre[\s-]?existing",
                capture: Capture::Duration { value: 1, unit: 2 },
                confidence: 0.9,
            },
            RuleSpec {
                name: "ped_abbreviation",
                pattern: r"\bped\b<gap>(<num>)<echo>\s*(<unit>)\b",
                capture: Capture::Duration { value: 1, unit: 2 },
                confidence: 0.85,
            },
            RuleSpec {
                name: "continuous_coverage",
                pattern: r"(<num>)<echo>\s*(<unit>)\s+of\s+continuous\s+coverage",
                capture: Capture::Duration { value: 1, unit: 2 },
                confidence: 0.6,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::Maternity,
        label: "Maternity expenses",
        keywords: &["maternity", "pregnancy", "childbirth"],
        terms: &["expenses", "cover", "delivery", "newborn"],
        template: "Maternity coverage: {value}",
        rules: &[
            RuleSpec {
                name: "maternity_expenses_covered",
                pattern: r"maternity(?:\s+\w+){0,3}\s+(?:expenses?|benefits?)<gap>(?:covered|payable|indemnif\w*|reimburs\w*|admissible)",
                capture: Capture::Sentence,
                confidence: 0.9,
            },
            RuleSpec {
                name: "maternity_excluded",
                pattern: r"maternity<gap>(?:excluded|not\s+covered|exclusion)",
                capture: Capture::Sentence,
                confidence: 0.85,
            },
            RuleSpec {
                name: "pregnancy_expenses",
                pattern: r"(?:pregnancy|childbirth)<gap>(?:expenses?|treatment|covered)",
                capture: Capture::Sentence,
                confidence: 0.75,
            },
            RuleSpec {
                name: "maternity_benefit",
                pattern: r"maternity<gap>(?:benefits?|treatment|expenses?)",
                capture: Capture::Sentence,
                confidence: 0.7,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::CataractWaiting,
        label: "Waiting period for cataract surgery",
        keywords: &["cataract"],
        terms: &["waiting period", "surgery"],
        template: "Waiting period for cataract surgery: {value}",
        rules: &[
            RuleSpec {
                name: "cataract_then_duration",
                pattern: r"cataract<gap>(<num>)<echo>\s*(<unit>)\b",
                capture: Capture::Duration { value: 1, unit: 2 },
                confidence: 0.95,
            },
            RuleSpec {
                name: "duration_then_cataract",
                pattern: r"(<num>)<echo>\s*(<unit>)<gap>cataract",
                capture: Capture::Duration { value: 1, unit: 2 },
                confidence: 0.85,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::OrganDonor,
        label: "Organ donor expenses",
        keywords: &["organ donor"],
        terms: &["expenses", "donor", "transplant", "harvesting"],
        template: "Organ donor expenses: {value}",
        rules: &[
            RuleSpec {
                name: "organ_donor_covered",
                pattern: r"organ\s+donor<gap>(?:covered|payable|indemnif\w*|reimburs\w*|admissible)",
                capture: Capture::Sentence,
                confidence: 0.9,
            },
            RuleSpec {
                name: "organ_donor_harvesting",
                pattern: r"(?:harvesting|transplant)\w*<gap>organ\s+donor|organ\s+donor<gap>(?:harvesting|transplant)",
                capture: Capture::Sentence,
                confidence: 0.8,
            },
            RuleSpec {
                name: "organ_donor_expenses",
                pattern: r"organ\s+donor<gap>(?:expenses?|costs?|hospitali[sz]ation)",
                capture: Capture::Sentence,
                confidence: 0.7,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::Ncd,
        label: "No claim discount",
        keywords: &["no claim discount", "no claims discount", "ncd"],
        terms: &["discount", "claim free"],
        template: "No Claim Discount (NCD): {value}",
        rules: &[
            RuleSpec {
                name: "ncd_then_percent",
                pattern: r"no[\s-]+claims?\s+discount<gap>(<num>)\s*<pct>",
                capture: Capture::Quantity { group: 1, unit: Unit::Percent },
                confidence: 0.95,
            },
            RuleSpec {
                name: "ncd_abbreviation",
                pattern: r"\bncd\b<gap>(<num>)\s*<pct>",
                capture: Capture::Quantity { group: 1, unit: Unit::Percent },
                confidence: 0.9,
            },
            RuleSpec {
                name: "percent_then_ncd",
                pattern: r"(<num>)\s*<pct><gap>(?:no[\s-]+claims?\s+discount|\bncd\b)",
                capture: Capture::Quantity { group: 1, unit: Unit::Percent },
                confidence: 0.85,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::PreventiveCheckup,
        label: "Preventive health check-up",
        keywords: &[
            "preventive health check",
            "health check up",
            "health checkup",
            "health screening",
        ],
        terms: &["preventive", "benefit", "annual"],
        template: "Preventive health check-up: {value}",
        rules: &[
            RuleSpec {
                name: "checkup_reimbursed",
                pattern: r"health\s+check[\s-]*ups?<gap>(?:covered|payable|indemnif\w*|reimburs\w*|admissible|allowed)",
                capture: Capture::Sentence,
                confidence: 0.85,
            },
            RuleSpec {
                name: "preventive_checkup",
                pattern: r"(?:preventive|annual)\s+health\s+check[\s-]*ups?",
                capture: Capture::Sentence,
                confidence: 0.75,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::HospitalDefinition,
        label: "Definition of hospital",
        keywords: &["hospital"],
        terms: &["define", "defined", "definition", "means", "meaning"],
        template: "Hospital definition: {value}",
        rules: &[
            RuleSpec {
                name: "hospital_means",
                pattern: r#"\bhospital['"’”]?\s+(?:means|shall\s+mean|is\s+defined\s+as|refers\s+to)\s+((?:[^.]|\.\S){10,600})"#,
                capture: Capture::Clause { group: 1 },
                confidence: 0.95,
            },
            RuleSpec {
                name: "definition_of_hospital",
                pattern: r#"definition\s+of\s+(?:an?\s+|the\s+)?['"‘“]?hospital['"’”]?\s*[:\-–]?\s*((?:[^.]|\.\S){10,600})"#,
                capture: Capture::Clause { group: 1 },
                confidence: 0.85,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::Ayush,
        label: "AYUSH treatment",
        keywords: &["ayush", "ayurveda", "ayurvedic", "homeopathy", "unani", "siddha"],
        terms: &["coverage", "treatment", "yoga", "naturopathy"],
        template: "AYUSH coverage: {value}",
        rules: &[
            RuleSpec {
                name: "ayush_covered",
                pattern: r"ayush<gap>(?:covered|payable|indemnif\w*|reimburs\w*|admissible)",
                capture: Capture::Sentence,
                confidence: 0.9,
            },
            RuleSpec {
                name: "systems_of_medicine",
                pattern: r"(?:ayurved\w*|unani|siddha|homeopath\w*)<gap>(?:covered|payable|indemnif\w*|treatment)",
                capture: Capture::Sentence,
                confidence: 0.8,
            },
            RuleSpec {
                name: "ayush_treatment",
                pattern: r"ayush<gap>(?:treatment|hospital|day\s*care)",
                capture: Capture::Sentence,
                confidence: 0.7,
            },
        ],
    },
    CategorySpec {
        id: CategoryId::RoomRentLimit,
        label: "Room rent and ICU sub-limits",
        keywords: &["room rent", "icu charges", "icu", "sub-limit"],
        terms: &["plan a", "charges", "intensive care", "limit"],
        template: "Room rent and ICU sub-limits: {value}",
        rules: &[
            RuleSpec {
                name: "room_rent_and_icu_amounts",
                pattern: r"room\s+rent<gap><amt><gap>\bicu\b",
                capture: Capture::Sentence,
                confidence: 0.95,
            },
            RuleSpec {
                name: "room_rent_amount",
                pattern: r"room\s+rent<gap><amt>",
                capture: Capture::Sentence,
                confidence: 0.85,
            },
            RuleSpec {
                name: "icu_amount",
                pattern: r"\bicu\b<gap><amt>",
                capture: Capture::Sentence,
                confidence: 0.8,
            },
            RuleSpec {
                name: "sub_limit_mention",
                pattern: r"(?:room\s+rent|\bicu\b)<gap>sub[\s-]?limit|sub[\s-]?limit<gap>(?:room\s+rent|\bicu\b)",
                capture: Capture::Sentence,
                confidence: 0.7,
            },
        ],
    },
];
