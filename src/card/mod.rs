//! Payment card domain model
//!
//! A card is built from a digit-only number string and classified once at
//! construction. The number never changes afterwards; the expiry starts
//! absent and can be attached at most once.

pub mod classify;
pub mod extract;

pub use classify::{classify, format_grouped};
pub use extract::{extract_expiry, extract_number, extract_number_with, NumberPattern};

use std::fmt;

/// Payment network a card number classifies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardIssuer {
    Visa,
    MasterCard,
    Amex,
    Discover,
    UnionPay,
    /// Plausible number that matched no issuer rule
    Unknown,
}

impl CardIssuer {
    /// Issuer label shown as the confirmation title
    pub fn label(&self) -> &'static str {
        match self {
            CardIssuer::Visa => "VISA",
            CardIssuer::MasterCard => "MasterCard",
            CardIssuer::Amex => "American Express",
            CardIssuer::Discover => "Discover",
            CardIssuer::UnionPay => "UnionPay",
            CardIssuer::Unknown => "Unknown card",
        }
    }
}

impl fmt::Display for CardIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Card expiry as a two-digit month and two-digit year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryDate {
    month: u8,
    year: u8,
}

impl ExpiryDate {
    /// Create an expiry date; the extractor only produces months in 01-12
    pub fn new(month: u8, year: u8) -> Self {
        Self { month, year }
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u8 {
        self.year
    }

    /// Compact "MMYY" form carried by the outbound notification
    pub fn mmyy(&self) -> String {
        format!("{:02}{:02}", self.month, self.year)
    }
}

impl fmt::Display for ExpiryDate {
    /// "MM/YY" form shown on the confirmation surface
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

/// One extracted payment card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    issuer: CardIssuer,
    number: String,
    expiry: Option<ExpiryDate>,
}

impl Card {
    /// Build a card from a normalized digit string, classifying the issuer
    pub fn from_digits(number: impl Into<String>) -> Self {
        let number = number.into();
        let issuer = classify(&number);
        Self {
            issuer,
            number,
            expiry: None,
        }
    }

    pub fn issuer(&self) -> CardIssuer {
        self.issuer
    }

    /// The digit-only card number
    pub fn number(&self) -> &str {
        &self.number
    }

    /// The number grouped for display (4-6-5 for 15 digits, four groups of
    /// four for 16, verbatim otherwise)
    pub fn formatted_number(&self) -> String {
        format_grouped(&self.number)
    }

    pub fn expiry(&self) -> Option<ExpiryDate> {
        self.expiry
    }

    /// Attach the expiry if none is set yet; later calls are no-ops
    pub fn attach_expiry(&mut self, expiry: ExpiryDate) {
        if self.expiry.is_none() {
            self.expiry = Some(expiry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_classifies_at_construction() {
        let card = Card::from_digits("4111111111111111");
        assert_eq!(card.issuer(), CardIssuer::Visa);
        assert_eq!(card.number(), "4111111111111111");
        assert_eq!(card.expiry(), None);
    }

    #[test]
    fn test_unknown_number_still_builds_a_card() {
        let card = Card::from_digits("9999999999999");
        assert_eq!(card.issuer(), CardIssuer::Unknown);
        assert_eq!(card.number(), "9999999999999");
    }

    #[test]
    fn test_expiry_attaches_once() {
        let mut card = Card::from_digits("4111111111111111");
        card.attach_expiry(ExpiryDate::new(3, 25));
        card.attach_expiry(ExpiryDate::new(12, 99));
        assert_eq!(card.expiry(), Some(ExpiryDate::new(3, 25)));
    }

    #[test]
    fn test_expiry_display_forms() {
        let expiry = ExpiryDate::new(3, 25);
        assert_eq!(expiry.to_string(), "03/25");
        assert_eq!(expiry.mmyy(), "0325");
    }

    #[test]
    fn test_issuer_labels() {
        assert_eq!(CardIssuer::Visa.label(), "VISA");
        assert_eq!(CardIssuer::Amex.label(), "American Express");
        assert_eq!(CardIssuer::Unknown.to_string(), "Unknown card");
    }
}
