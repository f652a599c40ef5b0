//! Field extraction from raw OCR text
//!
//! Both extractors are pure: absence is the no-match result, never an error,
//! and re-running them on the same text yields the same outcome.

use super::ExpiryDate;

/// Plausible digit-count window for a card number run
///
/// The default window of 13 to 19 digits covers every issuer rule this crate
/// classifies. Runs outside the window are skipped whole, not truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberPattern {
    /// Minimum digit count for a plausible run
    pub min_digits: usize,
    /// Maximum digit count for a plausible run
    pub max_digits: usize,
}

impl Default for NumberPattern {
    fn default() -> Self {
        Self {
            min_digits: 13,
            max_digits: 19,
        }
    }
}

/// Extract a card-number candidate using the default pattern
pub fn extract_number(text: &str) -> Option<String> {
    extract_number_with(text, &NumberPattern::default())
}

/// Extract the first plausible card-number run from OCR text
///
/// A run is a sequence of ASCII digits in which consecutive digits may be
/// separated by a single space or hyphen. The run is normalized to digits
/// only and returned when its digit count falls inside `pattern`; runs
/// outside the window end the run and scanning continues after them.
pub fn extract_number_with(text: &str, pattern: &NumberPattern) -> Option<String> {
    let mut chars = text.chars().peekable();
    let mut run = String::new();

    while let Some(c) = chars.next() {
        if c.is_ascii_digit() {
            run.push(c);
            continue;
        }
        // A single separator keeps the run alive only between two digits.
        if (c == ' ' || c == '-')
            && !run.is_empty()
            && chars.peek().is_some_and(|next| next.is_ascii_digit())
        {
            continue;
        }
        if plausible(&run, pattern) {
            return Some(run);
        }
        run.clear();
    }

    plausible(&run, pattern).then_some(run)
}

fn plausible(run: &str, pattern: &NumberPattern) -> bool {
    (pattern.min_digits..=pattern.max_digits).contains(&run.len())
}

/// Extract the first expiry date from OCR text
///
/// Matches a two-digit month in 01-12, an optional `/`, and a two-digit
/// year. The scan is unanchored, so a match may start anywhere in the text,
/// including inside a longer digit run. Positions with an out-of-range month
/// just advance the scan.
pub fn extract_expiry(text: &str) -> Option<ExpiryDate> {
    let bytes = text.as_bytes();
    for at in 0..bytes.len() {
        let Some(month) = two_digits(bytes, at) else {
            continue;
        };
        if !(1..=12).contains(&month) {
            continue;
        }
        let year_at = if bytes.get(at + 2) == Some(&b'/') {
            at + 3
        } else {
            at + 2
        };
        if let Some(year) = two_digits(bytes, year_at) {
            return Some(ExpiryDate::new(month, year));
        }
    }
    None
}

/// Two consecutive ASCII digits starting at `at`, as a number
fn two_digits(bytes: &[u8], at: usize) -> Option<u8> {
    match (bytes.get(at), bytes.get(at + 1)) {
        (Some(hi), Some(lo)) if hi.is_ascii_digit() && lo.is_ascii_digit() => {
            Some((hi - b'0') * 10 + (lo - b'0'))
        }
        _ => None,
    }
}
