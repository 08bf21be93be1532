//! Text cleanup for values scraped from sportsbook pages.
//!
//! Pages render prices with typographic minus signs, thousands separators,
//! and stray line breaks. Anything that still fails to parse becomes an
//! empty quote; parsing never fails loudly.

use odds_arb_core::OddsQuote;

/// Typographic minus sign (U+2212).
const UNICODE_MINUS: char = '\u{2212}';

/// Non-breaking hyphen (U+2011) and plain hyphen (U+2010).
const HYPHENS: [char; 2] = ['\u{2011}', '\u{2010}'];

/// U+2212 as it appears when UTF-8 bytes are decoded as Windows-1252.
const MOJIBAKE_MINUS: &str = "\u{e2}\u{2c6}\u{2019}";

/// Parses a scraped American price such as `"-110"`, `"+150"`, `"−120"`, `"‑115"`, or `"1,200"`.
///
/// Fractional values are truncated toward zero. Empty, unparseable,
/// out-of-range, and zero values yield an empty quote.
#[must_use]
pub fn parse_american_odds(text: &str) -> OddsQuote {
    let cleaned = text
        .replace('\n', " ")
        .replace(MOJIBAKE_MINUS, "-")
        .replace(UNICODE_MINUS, "-")
        .replace(HYPHENS, "-")
        .replace(',', "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return OddsQuote::EMPTY;
    }

    let Ok(value) = cleaned.parse::<f64>() else {
        return OddsQuote::EMPTY;
    };
    if !value.is_finite() {
        return OddsQuote::EMPTY;
    }

    let truncated = value.trunc();
    if truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return OddsQuote::EMPTY;
    }

    // Range checked above, so the cast is exact.
    #[allow(clippy::cast_possible_truncation)]
    let whole = truncated as i32;
    OddsQuote::new(Some(whole))
}

/// Cleans a scraped team label for matching: trimmed and lower-cased.
#[must_use]
pub fn parse_team_name(text: &str) -> String {
    text.trim().to_lowercase()
}
