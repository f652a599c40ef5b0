//! Issuer classification and display grouping
//!
//! Pure functions over digit-only strings. A rule matches only when both its
//! prefix and one of its lengths match, and the first matching rule wins.

use super::CardIssuer;

/// Classify a digit string by issuer prefix and length
///
/// Rules are checked in priority order: American Express (34/37, 15 digits),
/// Discover (6011, 16), Visa (4, 13 or 16), MasterCard (51-55, 16), UnionPay
/// (62, 16 or 19). Returns [`CardIssuer::Unknown`] when nothing matches.
pub fn classify(digits: &str) -> CardIssuer {
    let len = digits.len();

    if (digits.starts_with("34") || digits.starts_with("37")) && len == 15 {
        return CardIssuer::Amex;
    }
    if digits.starts_with("6011") && len == 16 {
        return CardIssuer::Discover;
    }
    if digits.starts_with('4') && (len == 13 || len == 16) {
        return CardIssuer::Visa;
    }
    if starts_in_range(digits, 51, 55) && len == 16 {
        return CardIssuer::MasterCard;
    }
    if digits.starts_with("62") && (len == 16 || len == 19) {
        return CardIssuer::UnionPay;
    }

    CardIssuer::Unknown
}

/// True when the first two characters parse as a number in `lo..=hi`
fn starts_in_range(digits: &str, lo: u8, hi: u8) -> bool {
    digits
        .get(..2)
        .and_then(|prefix| prefix.parse::<u8>().ok())
        .is_some_and(|prefix| (lo..=hi).contains(&prefix))
}

/// Group a card number for display
///
/// 15 digits become `dddd dddddd ddddd`, 16 digits four groups of four, and
/// any other length is returned verbatim. The groups partition the input
/// exactly; nothing is dropped or padded.
pub fn format_grouped(digits: &str) -> String {
    // Grouping slices by byte; non-ASCII input comes back verbatim.
    if !digits.is_ascii() {
        return digits.to_string();
    }
    match digits.len() {
        15 => format!("{} {} {}", &digits[..4], &digits[4..10], &digits[10..]),
        16 => format!(
            "{} {} {} {}",
            &digits[..4],
            &digits[4..8],
            &digits[8..12],
            &digits[12..]
        ),
        _ => digits.to_string(),
    }
}
