//! Keyword and number helpers shared by the classifier, the handlers and the
//! profile collaborator.

use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)(['’])?").expect("digit run pattern is valid"));

/// True when any needle occurs in the haystack as a plain substring.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Returns the candidates found in `haystack`, preserving candidate order.
pub fn matching_keywords<'a>(haystack: &str, candidates: &[&'a str]) -> Vec<&'a str> {
    candidates
        .iter()
        .copied()
        .filter(|c| haystack.contains(c))
        .collect()
}

/// Extracts the first maximal run of ASCII digits from free text.
///
/// Signs and decimal points are not part of a run, so `"165.5"` yields 165.
/// A run directly followed by a feet marker is skipped (`5'8"` yields 8); if
/// every run carries the marker the first one is used. Runs too large for a
/// `u32` are treated as absent.
pub fn extract_number(text: &str) -> Option<u32> {
    let mut first_marked = None;
    for caps in DIGIT_RUN.captures_iter(text) {
        let digits = caps.get(1)?.as_str();
        if caps.get(2).is_some() {
            if first_marked.is_none() {
                first_marked = Some(digits);
            }
            continue;
        }
        return digits.parse().ok();
    }
    first_marked.and_then(|d| d.parse().ok())
}
