//! Quantity normalization: digits and English number words to integers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit attached to an extracted quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Days,
    Months,
    Years,
    Percent,
}

impl Unit {
    /// Parse a unit word as it appears in policy text ("day", "Months", "per cent").
    pub fn from_str(s: &str) -> Option<Self> {
        let s: String = s
            .to_lowercase()
            .chars()
            .filter(|c| c.is_alphabetic() || *c == '%')
            .collect();

        match s.as_str() {
            "day" | "days" => Some(Self::Days),
            "month" | "months" => Some(Self::Months),
            "year" | "years" => Some(Self::Years),
            "%" | "percent" | "percentage" => Some(Self::Percent),
            _ => None,
        }
    }

    fn label(&self, amount: u32) -> &'static str {
        match (self, amount) {
            (Self::Days, 1) => "day",
            (Self::Days, _) => "days",
            (Self::Months, 1) => "month",
            (Self::Months, _) => "months",
            (Self::Years, 1) => "year",
            (Self::Years, _) => "years",
            (Self::Percent, _) => "%",
        }
    }
}

/// A canonical integer + unit value, e.g. `30 days` or `5%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: u32,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(amount: u32, unit: Unit) -> Self {
        Self { amount, unit }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Percent => write!(f, "{}%", self.amount),
            unit => write!(f, "{} {}", self.amount, unit.label(self.amount)),
        }
    }
}

/// Parse a number written as digits or English words.
///
/// Handles "30", "1,095", "thirty", "thirty-six" and "twenty four".
/// Returns `None` for anything else, including values above 999.
pub fn parse_number(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if s.chars().all(|c| c.is_ascii_digit() || c == ',') {
        let digits: String = s.chars().filter(|&c| c != ',').collect();
        return digits.parse().ok().filter(|&n: &u32| n < 1000);
    }

    let mut total = 0u32;
    let mut seen = false;
    for word in s
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|w| !w.is_empty())
    {
        let word = word.to_lowercase();
        if word == "and" {
            continue;
        }
        if word == "hundred" {
            total = total.max(1) * 100;
        } else {
            total += word_value(&word)?;
        }
        seen = true;
    }

    seen.then_some(total).filter(|&n| n < 1000)
}

fn word_value(word: &str) -> Option<u32> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits() {
        assert_eq!(parse_number("30"), Some(30));
        assert_eq!(parse_number(" 36 "), Some(36));
        assert_eq!(parse_number("1500"), None);
        assert_eq!(parse_number("1,095"), None);
        assert_eq!(parse_number(","), None);
    }

    #[test]
    fn test_parse_words() {
        assert_eq!(parse_number("thirty"), Some(30));
        assert_eq!(parse_number("Thirty-Six"), Some(36));
        assert_eq!(parse_number("twenty four"), Some(24));
        assert_eq!(parse_number("one hundred and twenty"), Some(120));
        assert_eq!(parse_number("many"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_unit_from_str() {
        assert_eq!(Unit::from_str("Days"), Some(Unit::Days));
        assert_eq!(Unit::from_str("month"), Some(Unit::Months));
        assert_eq!(Unit::from_str("per cent"), Some(Unit::Percent));
        assert_eq!(Unit::from_str("%"), Some(Unit::Percent));
        assert_eq!(Unit::from_str("weeks"), None);
    }

    #[test]
    fn test_quantity_display() {
        assert_eq!(Quantity::new(30, Unit::Days).to_string(), "30 days");
        assert_eq!(Quantity::new(1, Unit::Years).to_string(), "1 year");
        assert_eq!(Quantity::new(5, Unit::Percent).to_string(), "5%");
    }
}
