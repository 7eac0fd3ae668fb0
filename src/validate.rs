//! Field format rules shared by every form.
//!
//! All checks are pure: the same value and rule always give the same
//! [`Validation`].

use std::sync::LazyLock;

use regex::Regex;

const NAME_PATTERN: &str = r"^[A-Za-z\s]{2,50}$";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$";
// ASCII digits only; `\d` would also accept other Unicode digits.
const PHONE_PATTERN: &str = r"^[0-9]{10}$";

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(NAME_PATTERN).expect("name pattern compiles"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"));

/// Minimum trimmed length of names and admin text fields.
pub const MIN_TEXT_LEN: usize = 2;

/// A named format rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Letters and whitespace, 2 to 50 characters after trimming.
    Name,
    /// `local@domain.tld` with a TLD of at least two characters.
    Email,
    /// Ten digits, or nothing at all.
    Phone,
    /// Anything but blank.
    Required,
    /// At least `min` characters after trimming, otherwise `message`.
    MinLength {
        /// Minimum character count.
        min: usize,
        /// Failure message shown next to the field.
        message: &'static str,
    },
}

/// Outcome of checking one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// The value satisfies the rule.
    Pass,
    /// The value violates the rule; carries the reason.
    Fail(&'static str),
}

impl Validation {
    /// True for [`Validation::Pass`].
    pub fn is_pass(&self) -> bool {
        matches!(self, Validation::Pass)
    }

    /// Failure reason, if any.
    pub fn message(&self) -> Option<&'static str> {
        match *self {
            Validation::Pass => None,
            Validation::Fail(msg) => Some(msg),
        }
    }
}

/// Checks `value` against `rule`.
pub fn validate(value: &str, rule: Rule) -> Validation {
    let trimmed = value.trim();
    match rule {
        Rule::Name => {
            if trimmed.chars().count() < MIN_TEXT_LEN {
                Validation::Fail("Name must be at least 2 characters")
            } else if !NAME_RE.is_match(trimmed) {
                Validation::Fail("Name should contain only letters and spaces")
            } else {
                Validation::Pass
            }
        }
        Rule::Email => {
            if trimmed.is_empty() {
                Validation::Fail("Email is required")
            } else if !EMAIL_RE.is_match(trimmed) {
                Validation::Fail("Please enter a valid email address")
            } else {
                Validation::Pass
            }
        }
        Rule::Phone => {
            if trimmed.is_empty() || PHONE_RE.is_match(trimmed) {
                Validation::Pass
            } else {
                Validation::Fail("Phone number must be 10 digits")
            }
        }
        Rule::Required => {
            if trimmed.is_empty() {
                Validation::Fail("This field is required")
            } else {
                Validation::Pass
            }
        }
        Rule::MinLength { min, message } => {
            if trimmed.chars().count() < min {
                Validation::Fail(message)
            } else {
                Validation::Pass
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_boundaries() {
        assert!(validate("Jo", Rule::Name).is_pass());
        assert_eq!(
            validate("J", Rule::Name),
            Validation::Fail("Name must be at least 2 characters")
        );
        assert!(validate("  Ada Lovelace  ", Rule::Name).is_pass());
        assert!(validate(&"a".repeat(50), Rule::Name).is_pass());
        assert!(!validate(&"a".repeat(51), Rule::Name).is_pass());
        assert_eq!(
            validate("R2D2", Rule::Name),
            Validation::Fail("Name should contain only letters and spaces")
        );
    }

    #[test]
    fn email_needs_two_char_tld() {
        assert!(validate("john@x.co", Rule::Email).is_pass());
        assert!(!validate("john@x", Rule::Email).is_pass());
        assert!(!validate("john@x.c", Rule::Email).is_pass());
        assert!(!validate("jo hn@x.co", Rule::Email).is_pass());
        assert_eq!(validate("", Rule::Email), Validation::Fail("Email is required"));
    }

    #[test]
    fn phone_is_optional_but_exact() {
        assert!(validate("", Rule::Phone).is_pass());
        assert!(validate("   ", Rule::Phone).is_pass());
        assert!(validate("0123456789", Rule::Phone).is_pass());
        assert!(!validate("12345", Rule::Phone).is_pass());
        assert!(!validate("01234567890", Rule::Phone).is_pass());
        assert!(!validate("012345678٩", Rule::Phone).is_pass());
    }

    #[test]
    fn required_and_min_length() {
        assert!(!validate("   ", Rule::Required).is_pass());
        assert!(validate("x", Rule::Required).is_pass());

        let rule = Rule::MinLength {
            min: 2,
            message: "Department is required",
        };
        assert_eq!(validate(" P ", rule).message(), Some("Department is required"));
        assert!(validate("PE", rule).is_pass());
    }
}
