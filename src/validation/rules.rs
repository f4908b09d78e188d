//! Field rules
//!
//! Each form field maps to exactly one pattern and one message. Adding a
//! variant to [`Field`] forces every match below to handle it.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S(?:.*\S)?$|^[^ ]$").expect("description rule"));

static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$").expect("amount rule"));

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").expect("date rule")
});

static CATEGORY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").expect("category rule"));

// ASCII word characters, matching the classic `\w` class.
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("word rule"));

/// Fields that carry a validation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Description,
    Amount,
    Date,
    Category,
    /// Duplicate-word check on the description
    Advanced,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Amount => "amount",
            Self::Date => "date",
            Self::Category => "category",
            Self::Advanced => "advanced",
        }
    }

    /// Static message shown when the field fails its rule
    pub fn error_message(&self) -> &'static str {
        match self {
            Self::Description => "Description required. No leading/trailing spaces allowed.",
            Self::Amount => "Enter a valid amount (> 0) up to two decimal places (e.g., 12.50).",
            Self::Date => "Use format YYYY-MM-DD.",
            Self::Category => "Only letters, spaces, and hyphens allowed (e.g., \"Dining Out\").",
            Self::Advanced => "Description contains duplicate words (e.g., \"coffee coffee\").",
        }
    }

    /// Test a raw value against this field's rule.
    ///
    /// For [`Field::Advanced`] a match means the text *has* a repeated word,
    /// i.e. it is the failure case.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Description => DESCRIPTION.is_match(value),
            Self::Amount => AMOUNT.is_match(value),
            Self::Date => DATE.is_match(value),
            Self::Category => CATEGORY.is_match(value),
            Self::Advanced => has_repeated_word(value),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(Self::Description),
            "amount" => Ok(Self::Amount),
            "date" => Ok(Self::Date),
            "category" => Ok(Self::Category),
            "advanced" => Ok(Self::Advanced),
            other => Err(format!("Unknown field '{}'", other)),
        }
    }
}

/// Detect a word immediately repeated after whitespace ("the the").
///
/// Case-sensitive and bounded by word boundaries, so "the theory" and
/// "The the" do not count.
pub fn has_repeated_word(text: &str) -> bool {
    let mut words = WORD.find_iter(text).peekable();
    while let Some(word) = words.next() {
        if let Some(next) = words.peek() {
            let gap = &text[word.end()..next.start()];
            if !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && word.as_str() == next.as_str()
            {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_rule() {
        assert!(Field::Description.matches("Lunch"));
        assert!(Field::Description.matches("a"));
        assert!(Field::Description.matches("Lunch with team"));
        assert!(!Field::Description.matches(" Lunch"));
        assert!(!Field::Description.matches("Lunch "));
        assert!(!Field::Description.matches(""));
    }

    #[test]
    fn test_amount_rule() {
        assert!(Field::Amount.matches("12.5"));
        assert!(Field::Amount.matches("0.99"));
        assert!(!Field::Amount.matches("12.555"));
        assert!(!Field::Amount.matches("012"));
        assert!(!Field::Amount.matches("-3"));
    }

    #[test]
    fn test_date_rule_is_coarse() {
        assert!(Field::Date.matches("2024-01-31"));
        assert!(Field::Date.matches("2024-02-31"));
        assert!(!Field::Date.matches("2024-13-01"));
        assert!(!Field::Date.matches("2024-1-01"));
    }

    #[test]
    fn test_category_rule() {
        assert!(Field::Category.matches("Food"));
        assert!(Field::Category.matches("Dining Out"));
        assert!(Field::Category.matches("Self-Care"));
        assert!(!Field::Category.matches("Dining  Out"));
        assert!(!Field::Category.matches("Food2"));
        assert!(!Field::Category.matches("Food "));
    }

    #[test]
    fn test_repeated_word() {
        assert!(has_repeated_word("coffee coffee"));
        assert!(has_repeated_word("bought the the milk"));
        assert!(has_repeated_word("tea\t tea"));
        assert!(!has_repeated_word("the theory"));
        assert!(!has_repeated_word("The the"));
        assert!(!has_repeated_word("coffee, coffee"));
        assert!(!has_repeated_word("cat at"));
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in [
            Field::Description,
            Field::Amount,
            Field::Date,
            Field::Category,
            Field::Advanced,
        ] {
            assert_eq!(field.name().parse::<Field>().unwrap(), field);
        }
        assert!("memo".parse::<Field>().is_err());
    }
}
