//! Shared regex fragments and compiled patterns for policy text.
//!
//! Rule patterns in the category table are written with placeholders that
//! [`expand`] replaces before compilation:
//!
//! - `<num>`  a number as digits (1-3) or English words ("thirty-six")
//! - `<gap>`  up to 150 characters that do not cross a sentence end
//! - `<unit>` a duration unit word, singular or plural
//! - `<pct>`  a percent sign or "percent" / "per cent"
//! - `<echo>` an optional digit echo after a worded number: "thirty (30)"
//! - `<amt>`  a money or percent amount: "1%", "Rs. 5,000", "INR 2000"

use lazy_static::lazy_static;
use regex::Regex;

/// Number as digits or words.
/// Digits may carry thousands separators ("1,095") so a value is never bound
/// from the tail of a longer number.
pub const NUMBER: &str = r"\b(?:\d{1,3}(?:,\d{3})+|\d+|(?:twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)(?:[\s-](?:one|two|three|four|five|six|seven|eight|nine)\b)?|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|ten|zero|one|two|three|four|five|six|seven|eight|nine)\b";

/// Bounded gap between an anchor phrase and the value it qualifies.
/// A period followed by whitespace ends a sentence; "2.5" or "i.e" do not.
pub const GAP: &str = r"(?:[^.]|\.\S){0,150}?";

/// Duration unit.
pub const UNIT: &str = r"(?:days?|months?|years?)";

/// Percent marker.
pub const PERCENT: &str = r"(?:%|per\s?cent)";

/// Optional "(30)" echo after a number written in words.
pub const ECHO: &str = r"(?:\s*\(\s*\d{1,3}\s*\))?";

/// Money or percent amount as written in sub-limit clauses.
pub const AMOUNT: &str = r"(?:\d{1,3}(?:\.\d+)?\s*<pct>|(?:rs\.?|inr|₹)\s*\d[\d,]*)";

/// Expand table placeholders into a full case-insensitive pattern.
pub fn expand(pattern: &str) -> String {
    let body = pattern
        .replace("<amt>", AMOUNT)
        .replace("<num>", NUMBER)
        .replace("<gap>", GAP)
        .replace("<unit>", UNIT)
        .replace("<pct>", PERCENT)
        .replace("<echo>", ECHO);
    format!("(?i){}", body)
}

lazy_static! {
    // Any whitespace run, including PDF line breaks
    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Word split by a hyphen at a line break: "pre-\nexisting"
    pub static ref HYPHEN_BREAK: Regex = Regex::new(r"(\p{L})-[ \t]*\r?\n\s*(\p{L})").unwrap();

    // Sentence terminator followed by whitespace
    pub static ref SENTENCE_END: Regex = Regex::new(r"[.!?;](?:\s|$)").unwrap();

    // Page separators some extractors insert
    pub static ref PAGE_MARKER: Regex = Regex::new(r"(?im)^[ \t]*-{2,}\s*page\s+\d+\s*-{2,}\s*$").unwrap();
}
