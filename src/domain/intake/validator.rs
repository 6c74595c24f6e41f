//! Per-field answer validators for the guided intake flow.
//!
//! Each validator is a pure, total function from a raw text answer to a
//! verdict. A failed verdict carries a human-readable message and never
//! touches committed answers; the caller re-prompts with the same question
//! until a valid answer arrives.
//!
//! The unit and typo matching here is intentionally loose (substring scans,
//! small correction dictionaries). That looseness is observable behavior the
//! rest of the system depends on, so it is preserved rather than tightened.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A field-scoped validation failure.
///
/// Recoverable: blocks advancement of the flow only. The Display
/// implementation is the exact text shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Answer is shorter than the field's minimum length.
    #[error("Please enter at least {min} characters")]
    TooShort { min: usize },

    /// Answer contains characters the field does not allow, or otherwise
    /// fails the field's format rules.
    #[error("{reason}")]
    InvalidFormat { reason: String },

    /// A numeric field where no number could be read.
    #[error("That doesn't look like a number")]
    NotANumber,

    /// A numeric field whose value falls outside the accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// The answer matched a known misspelling. Always a failure, even when
    /// the corrected form would itself be valid.
    #[error("Did you mean \"{suggestion}\"?")]
    DidYouMean { suggestion: String },

    /// Free-text field with too little content.
    #[error("Could you share a bit more detail?")]
    NeedsMoreDetail,
}

impl FieldError {
    fn invalid(reason: impl Into<String>) -> Self {
        FieldError::InvalidFormat {
            reason: reason.into(),
        }
    }

    fn did_you_mean(suggestion: impl Into<String>) -> Self {
        FieldError::DidYouMean {
            suggestion: suggestion.into(),
        }
    }
}

/// The kind of field an intake question collects.
///
/// Dispatches to the matching pure validator. Yes/no questions carry no
/// field kind; they accept any answer and are interpreted by the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Age,
    Gender,
    Height,
    Weight,
    Location,
    /// Required free text, minimum 3 characters after trimming.
    FreeText,
}

impl FieldKind {
    /// Every field kind, for exhaustive property checks.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Name,
        FieldKind::Age,
        FieldKind::Gender,
        FieldKind::Height,
        FieldKind::Weight,
        FieldKind::Location,
        FieldKind::FreeText,
    ];

    /// Validates a raw answer against this field's rules.
    ///
    /// Pure and total: never panics on ordinary strings, holds no state.
    ///
    /// # Errors
    ///
    /// A [`FieldError`] describing exactly why the answer was rejected.
    pub fn validate(&self, raw: &str) -> Result<(), FieldError> {
        match self {
            FieldKind::Name => validate_name(raw),
            FieldKind::Age => validate_age(raw),
            FieldKind::Gender => validate_gender(raw),
            FieldKind::Height => validate_height(raw),
            FieldKind::Weight => validate_weight(raw),
            FieldKind::Location => validate_location(raw),
            FieldKind::FreeText => validate_free_text(raw),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Correction dictionaries and accepted terms
// ─────────────────────────────────────────────────────────────────────────────

/// Misspellings of gender terms, matched against the whole normalized answer.
/// A hit always fails validation with a suggestion.
static GENDER_TYPOS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mail", "male"),
        ("maile", "male"),
        ("mael", "male"),
        ("femail", "female"),
        ("femal", "female"),
        ("femle", "female"),
        ("non binary", "non-binary"),
        ("trans gender", "transgender"),
    ])
});

/// Accepted gender terms. The scan is equals, then starts-with, then
/// contains, in that order.
const GENDER_TERMS: [&str; 7] = [
    "male",
    "female",
    "non-binary",
    "nonbinary",
    "transgender",
    "prefer not to say",
    "other",
];

/// Weight unit misspellings, scanned in order as substrings. Plural and
/// run-together forms are listed so that the valid singular units below
/// never trip them.
const WEIGHT_UNIT_TYPOS: [(&str, &str); 4] = [
    ("kgs", "kg"),
    ("kilograms", "kilogram"),
    ("lbs", "lb"),
    ("pounds", "pound"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Per-field validators
// ─────────────────────────────────────────────────────────────────────────────

fn validate_name(raw: &str) -> Result<(), FieldError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 2 {
        return Err(FieldError::TooShort { min: 2 });
    }
    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(FieldError::invalid("Names cannot contain numbers"));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-' || c == '\'')
    {
        return Err(FieldError::invalid(
            "Names may only contain letters, spaces, hyphens and apostrophes",
        ));
    }
    let punctuation = trimmed.chars().filter(|c| *c == '-' || *c == '\'').count();
    if punctuation > 3 {
        return Err(FieldError::invalid(
            "That's too many hyphens or apostrophes for a name",
        ));
    }
    if trimmed
        .split_whitespace()
        .any(|word| !word.chars().any(char::is_alphabetic))
    {
        return Err(FieldError::invalid(
            "Each part of your name must contain at least one letter",
        ));
    }
    Ok(())
}

fn validate_age(raw: &str) -> Result<(), FieldError> {
    let age: i64 = raw.trim().parse().map_err(|_| FieldError::NotANumber)?;
    if !(0..=150).contains(&age) {
        return Err(FieldError::OutOfRange {
            field: "Age",
            min: 0.0,
            max: 150.0,
        });
    }
    Ok(())
}

fn validate_gender(raw: &str) -> Result<(), FieldError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 2 {
        return Err(FieldError::TooShort { min: 2 });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '-')
    {
        return Err(FieldError::invalid(
            "Gender may only contain letters, spaces and hyphens",
        ));
    }

    let normalized = trimmed.to_lowercase();

    // Typo dictionary wins over the accepted-term scan: a recognized
    // misspelling is rejected with a suggestion even though the corrected
    // form would pass.
    if let Some(correction) = GENDER_TYPOS.get(normalized.as_str()) {
        return Err(FieldError::did_you_mean(*correction));
    }

    let accepted = GENDER_TERMS.iter().any(|term| {
        normalized == *term || normalized.starts_with(term) || normalized.contains(term)
    });
    if accepted {
        Ok(())
    } else {
        Err(FieldError::invalid(
            "Please enter a gender such as male, female, non-binary, transgender, other, or prefer not to say",
        ))
    }
}

fn validate_height(raw: &str) -> Result<(), FieldError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 2 {
        return Err(FieldError::TooShort { min: 2 });
    }
    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(FieldError::invalid(
            "Please include a number in your height",
        ));
    }

    let normalized = trimmed.to_lowercase();
    let value = leading_number(&normalized).ok_or(FieldError::NotANumber)?;

    // Unit branches are checked in a fixed order; "cm" must come before the
    // bare "m" check since it contains it. Strings with no recognized unit
    // fall through to the bare-number branch.
    if normalized.contains("cm") || normalized.contains("centimeter") {
        range_check(value, "Height", 50.0, 300.0)
    } else if normalized.contains('m') {
        range_check(value, "Height", 0.5, 3.0)
    } else if normalized.contains("feet") || normalized.contains("ft") || normalized.contains('\'')
    {
        Ok(())
    } else if normalized.contains("inch") {
        range_check(value, "Height", 20.0, 120.0)
    } else {
        range_check(value, "Height", 0.5, 300.0)
    }
}

fn validate_weight(raw: &str) -> Result<(), FieldError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 2 {
        return Err(FieldError::TooShort { min: 2 });
    }
    if !trimmed.chars().any(|c| c.is_ascii_digit()) {
        return Err(FieldError::invalid(
            "Please include a number in your weight",
        ));
    }

    let normalized = trimmed.to_lowercase();

    // Unit misspellings fail before any range check runs.
    for (typo, correction) in WEIGHT_UNIT_TYPOS {
        if normalized.contains(typo) {
            return Err(FieldError::did_you_mean(correction));
        }
    }

    let value = leading_number(&normalized).ok_or(FieldError::NotANumber)?;

    if normalized.contains("kg") || normalized.contains("kilogram") {
        range_check(value, "Weight", 2.0, 500.0)
    } else if normalized.contains("lb") || normalized.contains("pound") {
        range_check(value, "Weight", 5.0, 1100.0)
    } else {
        range_check(value, "Weight", 2.0, 500.0)
    }
}

fn validate_location(raw: &str) -> Result<(), FieldError> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 2 {
        return Err(FieldError::TooShort { min: 2 });
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == ',' || c == '.' || c == '-')
    {
        return Err(FieldError::invalid(
            "Location may only contain letters, spaces, commas, periods and hyphens",
        ));
    }
    // A comma means "City, State": at least two parts, each substantial.
    if trimmed.contains(',') {
        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() < 2 || parts.iter().any(|p| p.chars().count() < 2) {
            return Err(FieldError::invalid(
                "Please use the form \"City, State\"",
            ));
        }
    }
    Ok(())
}

fn validate_free_text(raw: &str) -> Result<(), FieldError> {
    if raw.trim().chars().count() < 3 {
        return Err(FieldError::NeedsMoreDetail);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Extracts the first number appearing in the string, if any.
///
/// Scans to the first digit, backs up over an immediately preceding minus
/// sign, and consumes digits plus at most one decimal point. Handles inputs
/// like "175 cm", "5'11" and "about 1.8m" alike.
fn leading_number(s: &str) -> Option<f64> {
    let chars: Vec<char> = s.chars().collect();
    let mut start = chars.iter().position(|c| c.is_ascii_digit())?;
    if start > 0 && chars[start - 1] == '-' {
        start -= 1;
    }

    let mut end = start;
    let mut seen_dot = false;
    for &c in &chars[start..] {
        if c.is_ascii_digit() || (c == '-' && end == start) {
            end += 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end += 1;
        } else {
            break;
        }
    }

    let token: String = chars[start..end].iter().collect();
    token.trim_end_matches('.').parse().ok()
}

fn range_check(value: f64, field: &'static str, min: f64, max: f64) -> Result<(), FieldError> {
    if value < min || value > max {
        return Err(FieldError::OutOfRange { field, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod name {
        use super::*;

        #[test]
        fn accepts_plain_name() {
            assert_eq!(FieldKind::Name.validate("Anna"), Ok(()));
        }

        #[test]
        fn accepts_hyphenated_and_apostrophe_names() {
            assert_eq!(FieldKind::Name.validate("Anna-Marie"), Ok(()));
            assert_eq!(FieldKind::Name.validate("O'Connor"), Ok(()));
        }

        #[test]
        fn rejects_single_character() {
            assert_eq!(
                FieldKind::Name.validate("A"),
                Err(FieldError::TooShort { min: 2 })
            );
        }

        #[test]
        fn rejects_digits() {
            assert!(FieldKind::Name.validate("Anna2").is_err());
        }

        #[test]
        fn rejects_disallowed_punctuation() {
            assert!(FieldKind::Name.validate("Anna_Marie").is_err());
        }

        #[test]
        fn rejects_more_than_three_hyphens_or_apostrophes() {
            assert!(FieldKind::Name.validate("a-b-c-d'e").is_err());
            assert_eq!(FieldKind::Name.validate("a-b-c-d"), Ok(()));
        }

        #[test]
        fn rejects_word_without_a_letter() {
            assert!(FieldKind::Name.validate("Anna --").is_err());
        }

        #[test]
        fn trims_surrounding_whitespace() {
            assert_eq!(FieldKind::Name.validate("  Anna  "), Ok(()));
        }
    }

    mod age {
        use super::*;

        #[test]
        fn accepts_boundary_values() {
            assert_eq!(FieldKind::Age.validate("0"), Ok(()));
            assert_eq!(FieldKind::Age.validate("150"), Ok(()));
        }

        #[test]
        fn rejects_just_above_upper_bound() {
            assert!(FieldKind::Age.validate("151").is_err());
        }

        #[test]
        fn rejects_negative() {
            assert!(FieldKind::Age.validate("-1").is_err());
        }

        #[test]
        fn rejects_non_number() {
            assert_eq!(FieldKind::Age.validate("abc"), Err(FieldError::NotANumber));
        }

        #[test]
        fn out_of_range_message_names_the_bounds() {
            let err = FieldKind::Age.validate("200").unwrap_err();
            assert_eq!(err.to_string(), "Age must be between 0 and 150");
        }
    }

    mod gender {
        use super::*;

        #[test]
        fn accepts_exact_terms_case_insensitively() {
            assert_eq!(FieldKind::Gender.validate("Male"), Ok(()));
            assert_eq!(FieldKind::Gender.validate("female"), Ok(()));
            assert_eq!(FieldKind::Gender.validate("Non-Binary"), Ok(()));
            assert_eq!(FieldKind::Gender.validate("prefer not to say"), Ok(()));
        }

        #[test]
        fn typo_fails_with_suggestion() {
            assert_eq!(
                FieldKind::Gender.validate("mail"),
                Err(FieldError::did_you_mean("male"))
            );
            assert_eq!(
                FieldKind::Gender.validate("femail"),
                Err(FieldError::did_you_mean("female"))
            );
            assert_eq!(
                FieldKind::Gender.validate("non binary"),
                Err(FieldError::did_you_mean("non-binary"))
            );
        }

        #[test]
        fn typo_beats_accepted_term_scan() {
            // "maile" contains no accepted term but "Maile" normalizes to a
            // dictionary key; the suggestion path must win.
            let err = FieldKind::Gender.validate("Maile").unwrap_err();
            assert_eq!(err.to_string(), "Did you mean \"male\"?");
        }

        #[test]
        fn rejects_terms_outside_the_accepted_set() {
            assert!(FieldKind::Gender.validate("Xy").is_err());
        }

        #[test]
        fn contains_scan_over_accepts() {
            // Known-loose behavior: any string containing an accepted term
            // passes.
            assert_eq!(FieldKind::Gender.validate("I am male thanks"), Ok(()));
        }

        #[test]
        fn rejects_digits_and_symbols() {
            assert!(FieldKind::Gender.validate("male!").is_err());
        }

        #[test]
        fn rejects_single_character() {
            assert_eq!(
                FieldKind::Gender.validate("m"),
                Err(FieldError::TooShort { min: 2 })
            );
        }
    }

    mod height {
        use super::*;

        #[test]
        fn centimeters_boundary() {
            assert_eq!(FieldKind::Height.validate("300 cm"), Ok(()));
            assert!(FieldKind::Height.validate("301 cm").is_err());
            assert_eq!(FieldKind::Height.validate("50cm"), Ok(()));
            assert!(FieldKind::Height.validate("49 cm").is_err());
        }

        #[test]
        fn meters_boundary() {
            assert_eq!(FieldKind::Height.validate("1.8 m"), Ok(()));
            assert_eq!(FieldKind::Height.validate("3 meters"), Ok(()));
            assert!(FieldKind::Height.validate("4 m").is_err());
        }

        #[test]
        fn feet_accepted_without_numeric_check() {
            assert_eq!(FieldKind::Height.validate("5 feet"), Ok(()));
            assert_eq!(FieldKind::Height.validate("6 ft"), Ok(()));
            assert_eq!(FieldKind::Height.validate("5'11"), Ok(()));
        }

        #[test]
        fn inches_boundary() {
            assert_eq!(FieldKind::Height.validate("70 inches"), Ok(()));
            assert!(FieldKind::Height.validate("10 inches").is_err());
        }

        #[test]
        fn bare_number_in_range() {
            assert_eq!(FieldKind::Height.validate("175"), Ok(()));
            assert!(FieldKind::Height.validate("301").is_err());
        }

        #[test]
        fn rejects_no_digit() {
            assert!(FieldKind::Height.validate("cm").is_err());
            assert!(FieldKind::Height.validate("tall").is_err());
        }

        #[test]
        fn unrecognized_unit_falls_through_to_bare_number() {
            // "hands" matches none of the unit substrings, so the bare
            // branch checks the parsed 175.
            assert_eq!(FieldKind::Height.validate("175 hands"), Ok(()));
        }
    }

    mod weight {
        use super::*;

        #[test]
        fn kilograms_in_range() {
            assert_eq!(FieldKind::Weight.validate("70 kg"), Ok(()));
            assert_eq!(FieldKind::Weight.validate("2kg"), Ok(()));
            assert!(FieldKind::Weight.validate("501 kg").is_err());
        }

        #[test]
        fn pounds_in_range() {
            assert_eq!(FieldKind::Weight.validate("150 lb"), Ok(()));
            assert_eq!(FieldKind::Weight.validate("150 pound"), Ok(()));
            assert!(FieldKind::Weight.validate("3 lb").is_err());
        }

        #[test]
        fn unit_typo_fails_with_suggestion() {
            assert_eq!(
                FieldKind::Weight.validate("70kgs"),
                Err(FieldError::did_you_mean("kg"))
            );
            assert_eq!(
                FieldKind::Weight.validate("150 lbs"),
                Err(FieldError::did_you_mean("lb"))
            );
            assert_eq!(
                FieldKind::Weight.validate("70 kilograms"),
                Err(FieldError::did_you_mean("kilogram"))
            );
        }

        #[test]
        fn bare_number_uses_kilogram_range() {
            assert_eq!(FieldKind::Weight.validate("70"), Ok(()));
            assert!(FieldKind::Weight.validate("1").is_err());
        }

        #[test]
        fn rejects_no_digit() {
            assert!(FieldKind::Weight.validate("heavy").is_err());
        }
    }

    mod location {
        use super::*;

        #[test]
        fn accepts_city_only() {
            assert_eq!(FieldKind::Location.validate("Portland"), Ok(()));
        }

        #[test]
        fn accepts_city_state_pair() {
            assert_eq!(FieldKind::Location.validate("Portland, Oregon"), Ok(()));
            assert_eq!(FieldKind::Location.validate("St. Paul, MN"), Ok(()));
        }

        #[test]
        fn comma_requires_two_substantial_parts() {
            assert!(FieldKind::Location.validate("Portland,").is_err());
            assert!(FieldKind::Location.validate("Portland, O").is_err());
        }

        #[test]
        fn rejects_digits() {
            assert!(FieldKind::Location.validate("Area 51").is_err());
        }

        #[test]
        fn rejects_single_character() {
            assert!(FieldKind::Location.validate("X").is_err());
        }
    }

    mod free_text {
        use super::*;

        #[test]
        fn requires_three_characters_after_trim() {
            assert_eq!(FieldKind::FreeText.validate("flu"), Ok(()));
            assert_eq!(
                FieldKind::FreeText.validate("  ok  "),
                Err(FieldError::NeedsMoreDetail)
            );
        }
    }

    mod properties {
        use super::*;

        proptest! {
            #[test]
            fn validators_never_panic(raw in ".*") {
                for kind in FieldKind::ALL {
                    let _ = kind.validate(&raw);
                }
            }

            #[test]
            fn validators_are_idempotent(raw in ".*") {
                for kind in FieldKind::ALL {
                    prop_assert_eq!(kind.validate(&raw), kind.validate(&raw));
                }
            }
        }
    }
}
