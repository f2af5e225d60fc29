//! Field format checks.
//!
//! The store calls a [`Validator`] before anything is written; it never
//! implements format rules itself. [`RegexValidator`] is the default.
//!
//! Rules of the default validator:
//! - name: required; letters, spaces, hyphens, apostrophes and periods
//! - phone: required; optional leading `+`, then digits, spaces, `-`, `.`,
//!   parentheses, with at least 7 digits
//! - email: optional; `local@domain.tld`
//! - date: optional; a real calendar date written `YYYY-MM-DD`

use crate::model::{Field, BIRTHDAY_FORMAT};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

const MIN_PHONE_DIGITS: usize = 7;

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-\.\(\)]+$").expect("phone pattern"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern")
});
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern"));

/// Boolean format predicates consumed by the store.
///
/// Empty optional fields (email, date) are valid.
pub trait Validator {
    fn is_valid_name(&self, name: &str) -> bool;
    fn is_valid_phone(&self, phone: &str) -> bool;
    fn is_valid_email(&self, email: &str) -> bool;
    fn is_valid_date(&self, date: &str) -> bool;

    /// Dispatch on a field. Fields without a format rule always pass.
    fn is_valid(&self, field: Field, value: &str) -> bool {
        match field {
            Field::Name => self.is_valid_name(value),
            Field::Phone => self.is_valid_phone(value),
            Field::Email => self.is_valid_email(value),
            Field::Birthday => self.is_valid_date(value),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegexValidator;

impl Validator for RegexValidator {
    fn is_valid_name(&self, name: &str) -> bool {
        !name.trim().is_empty()
            && name
                .chars()
                .all(|c| c.is_alphabetic() || c == ' ' || matches!(c, '-' | '\'' | '.'))
    }

    fn is_valid_phone(&self, phone: &str) -> bool {
        PHONE_RE.is_match(phone)
            && phone.chars().filter(|c| c.is_ascii_digit()).count() >= MIN_PHONE_DIGITS
    }

    fn is_valid_email(&self, email: &str) -> bool {
        email.is_empty() || EMAIL_RE.is_match(email)
    }

    fn is_valid_date(&self, date: &str) -> bool {
        date.is_empty()
            || (DATE_RE.is_match(date) && NaiveDate::parse_from_str(date, BIRTHDAY_FORMAT).is_ok())
    }
}

/// Line breaks would split a field across records in the contact file.
pub fn is_single_line(value: &str) -> bool {
    !value.contains(['\n', '\r'])
}

/// Tags must be non-blank single-line strings.
pub fn is_valid_tag(tag: &str) -> bool {
    !tag.trim().is_empty() && is_single_line(tag)
}
