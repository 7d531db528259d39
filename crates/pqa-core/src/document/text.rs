//! Text normalization for documents and questions.

use crate::policy::rules::patterns::{HYPHEN_BREAK, PAGE_MARKER, SENTENCE_END, WHITESPACE};

/// Normalize extracted document text into a single whitespace-collapsed line.
///
/// Page separators are dropped and words hyphenated across a line break are
/// joined back ("pre-\nexisting" becomes "pre-existing").
pub fn normalize_document(text: &str) -> String {
    let text = PAGE_MARKER.replace_all(text, " ");
    let text = HYPHEN_BREAK.replace_all(&text, "$1-$2");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Normalize a question for keyword scoring: lowercase, punctuation replaced
/// by spaces, whitespace collapsed.
pub fn normalize_question(question: &str) -> String {
    let cleaned: String = question
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Return the sentence containing `start..end`, or a word-trimmed window of
/// at most `window` bytes centred on it when the sentence is longer.
pub fn context_window(text: &str, start: usize, end: usize, window: usize) -> &str {
    let start = floor_char_boundary(text, start.min(text.len()));
    let end = ceil_char_boundary(text, end.clamp(start, text.len()));

    let (sentence_start, sentence_end) = sentence_bounds(text, start, end);
    let sentence = text[sentence_start..sentence_end].trim();
    if sentence.len() <= window {
        return sentence;
    }

    if end - start >= window {
        return text[start..end].trim();
    }

    let center = start + (end - start) / 2;
    let half = window / 2;
    let mut lo = center.saturating_sub(half).max(sentence_start);
    let hi = (lo + window).min(sentence_end);
    lo = hi.saturating_sub(window).max(sentence_start).min(start);

    let lo = floor_char_boundary(text, lo);
    let hi = ceil_char_boundary(text, hi.max(end));

    trim_to_words(text, lo, hi, start, end)
}

/// Byte bounds of the sentence enclosing `start..end`.
pub fn sentence_bounds(text: &str, start: usize, end: usize) -> (usize, usize) {
    let sentence_start = SENTENCE_END
        .find_iter(&text[..start])
        .last()
        .map(|m| m.end())
        .unwrap_or(0);

    let sentence_end = SENTENCE_END
        .find_at(text, end)
        .map(|m| m.start() + 1)
        .unwrap_or(text.len());

    (sentence_start, sentence_end.max(end))
}

/// Shrink `lo..hi` so it neither starts nor ends inside a word, keeping
/// `keep_start..keep_end` intact.
fn trim_to_words(text: &str, lo: usize, hi: usize, keep_start: usize, keep_end: usize) -> &str {
    let mut lo = lo;
    let mut hi = hi;

    if lo > 0 && !is_space_before(text, lo) {
        if let Some(offset) = text[lo..keep_start].find(char::is_whitespace) {
            lo += offset;
        }
    }

    if hi < text.len() && !is_space_at(text, hi) {
        if let Some(offset) = text[keep_end..hi].rfind(char::is_whitespace) {
            hi = keep_end + offset;
        }
    }

    text[lo..hi].trim()
}

fn is_space_before(text: &str, idx: usize) -> bool {
    text[..idx].chars().next_back().is_some_and(char::is_whitespace)
}

fn is_space_at(text: &str, idx: usize) -> bool {
    text[idx..].chars().next().is_some_and(char::is_whitespace)
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_document() {
        let raw = "Grace  period\n\nof thirty\r\n days.\n--- Page 2 ---\nPre-\n existing diseases";
        assert_eq!(
            normalize_document(raw),
            "Grace period of thirty days. Pre-existing diseases"
        );
    }

    #[test]
    fn test_normalize_question() {
        assert_eq!(
            normalize_question("What is the waiting period for pre-existing diseases (PED)?"),
            "what is the waiting period for pre existing diseases ped"
        );
        assert_eq!(normalize_question("  ?!  "), "");
    }

    #[test]
    fn test_context_window_returns_sentence() {
        let text = "Intro text. A Hospital is any institution with ten beds. Other clause.";
        let start = text.find("Hospital").unwrap();
        let window = context_window(text, start, start + 8, 200);
        assert_eq!(window, "A Hospital is any institution with ten beds.");
    }

    #[test]
    fn test_context_window_long_sentence_is_bounded() {
        let filler = "word ".repeat(100);
        let text = format!("{}keyword {}", filler, filler);
        let start = text.find("keyword").unwrap();
        let window = context_window(&text, start, start + 7, 60);

        assert!(window.len() <= 60);
        assert!(window.contains("keyword"));
        assert!(window.starts_with("word"));
        assert!(window.ends_with("word"));
    }

    #[test]
    fn test_context_window_multibyte() {
        let text = "Łódź ".repeat(80) + "ayush " + &"ćma ".repeat(80);
        let start = text.find("ayush").unwrap();
        let window = context_window(&text, start, start + 5, 50);
        assert!(window.contains("ayush"));
    }
}
