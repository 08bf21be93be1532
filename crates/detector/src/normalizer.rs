//! Team name canonicalization for cross-book matching.
//!
//! Books disagree on how much of a franchise name they print ("Boston Red
//! Sox" vs "Red Sox", "Los Angeles Dodgers" vs "LA Dodgers"). Matching keys
//! on the nickname alone lines most of them up.

/// Marker for franchises whose nickname spans two words.
const TWO_WORD_MARKER: &str = "sox";

/// Reduces a lower-cased team label to its nickname.
///
/// Labels containing `"sox"` keep their last two words (`"boston red sox"`
/// becomes `"red sox"`); everything else keeps only the last word. Applying
/// the rule twice gives the same result as applying it once.
#[must_use]
pub fn normalize_team_name(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let keep = if name.contains(TWO_WORD_MARKER) { 2 } else { 1 };
    let start = words.len().saturating_sub(keep);
    words[start..].join(" ")
}
