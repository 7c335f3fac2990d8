//! Client-side field validation for the member form
//!
//! All five rules run on every call, so the user sees every problem with
//! the form at once:
//!
//! | Field | Rule |
//! |-------|------|
//! | username | 3 to 20 characters |
//! | name | 3 to 16 characters |
//! | email | `local@domain.tld` shape |
//! | phone number | exactly 11 digits |
//! | date of birth | age 18 to 100 inclusive |
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ticketheaven_shared::models::member::MemberInput;
//! use ticketheaven_shared::validation::validate_member;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
//! let input = MemberInput {
//!     username: "ab".to_string(),
//!     name: "John".to_string(),
//!     email: "not-an-email".to_string(),
//!     phone_number: "12345678901".to_string(),
//!     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
//! };
//!
//! let errors = validate_member(&input, today).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

use std::fmt;
use std::sync::LazyLock;

use chrono::{Datelike, Months, NaiveDate};
use regex::Regex;
use serde::Serialize;
use validator::Validate;

use crate::models::member::MemberInput;

/// One or more non-"@"/whitespace characters, "@", domain, ".", suffix
pub static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

pub static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{11}$").expect("valid phone regex"));

pub const MIN_AGE: i32 = 18;
pub const MAX_AGE: i32 = 100;

/// Message shown when the date of birth is out of range
pub const AGE_MESSAGE: &str = "Age must be between 18 and 100 years.";

/// Form fields in the order their violations are reported
const FIELD_ORDER: [&str; 5] = ["username", "name", "email", "phone_number", "date_of_birth"];

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field that failed validation
    pub field: &'static str,

    /// Human-readable message
    pub message: String,
}

/// Every rule the form input violated, in form order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.violations.push(Violation {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// True if the given field has at least one violation
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// Messages joined with newlines, as shown in the notice body
    pub fn joined(&self) -> String {
        self.messages().join("\n")
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl std::error::Error for ValidationErrors {}

/// Computes a whole-year age on `today` for someone born on `birth`
///
/// The birthday in the current year is found by calendar year addition, so
/// someone born on 29 February turns a year older on 28 February in a
/// non-leap year.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use ticketheaven_shared::validation::calculate_age;
///
/// let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
/// assert_eq!(calculate_age(birth, NaiveDate::from_ymd_opt(2020, 6, 15).unwrap()), 20);
/// assert_eq!(calculate_age(birth, NaiveDate::from_ymd_opt(2020, 6, 14).unwrap()), 19);
/// ```
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();

    let birthday = if age >= 0 {
        birth.checked_add_months(Months::new(age as u32 * 12))
    } else {
        birth.checked_sub_months(Months::new(age.unsigned_abs() * 12))
    };

    match birthday {
        Some(birthday) if today < birthday => age -= 1,
        Some(_) => {}
        // Only reachable at the edges of the chrono date range
        None => {
            if (today.month(), today.day()) < (birth.month(), birth.day()) {
                age -= 1;
            }
        }
    }

    age
}

/// Checks every form rule against `input` as of `today`
///
/// # Errors
///
/// Returns all violations at once; there is no partial acceptance.
pub fn validate_member(input: &MemberInput, today: NaiveDate) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if let Err(field_errors) = input.validate() {
        let mut collected: Vec<(usize, Violation)> = Vec::new();

        for (field, list) in field_errors.field_errors() {
            let field: &str = &field;
            let Some(rank) = FIELD_ORDER.iter().position(|f| *f == field) else {
                continue;
            };

            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                collected.push((
                    rank,
                    Violation {
                        field: FIELD_ORDER[rank],
                        message,
                    },
                ));
            }
        }

        collected.sort_by_key(|(rank, _)| *rank);
        for (_, violation) in collected {
            errors.violations.push(violation);
        }
    }

    let age = calculate_age(input.date_of_birth, today);
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        errors.add("date_of_birth", AGE_MESSAGE);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn valid_input() -> MemberInput {
        MemberInput {
            username: "abc".to_string(),
            name: "John".to_string(),
            email: "a@b.co".to_string(),
            phone_number: "12345678901".to_string(),
            date_of_birth: date(2004, 6, 1),
        }
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_member(&valid_input(), today()).is_ok());
    }

    #[test]
    fn test_username_length_bounds() {
        let cases = [
            ("ab".to_string(), false),
            ("abc".to_string(), true),
            ("u".repeat(20), true),
            ("u".repeat(21), false),
        ];

        for (username, ok) in cases {
            let mut input = valid_input();
            input.username = username.clone();
            assert_eq!(validate_member(&input, today()).is_ok(), ok, "username {:?}", username);
        }
    }

    #[test]
    fn test_name_length_bounds() {
        let mut input = valid_input();
        input.name = "n".repeat(16);
        assert!(validate_member(&input, today()).is_ok());

        input.name = "n".repeat(17);
        let errors = validate_member(&input, today()).unwrap_err();
        assert_eq!(errors.messages(), vec!["Name must be between 3 and 16 characters."]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut input = valid_input();
        // 3 characters, 6 bytes
        input.name = "çöş".to_string();
        assert!(validate_member(&input, today()).is_ok());
    }

    #[test]
    fn test_email_pattern() {
        for email in ["a@b.co", "first.last@mail.example.org", "x@y.z"] {
            assert!(EMAIL_PATTERN.is_match(email), "{} should match", email);
        }

        for email in ["", "a@b", "@b.co", "a@.co", "a@b.", "a b@c.de", "a@@b.co", "a@b@c.de"] {
            assert!(!EMAIL_PATTERN.is_match(email), "{} should not match", email);
        }
    }

    #[test]
    fn test_phone_pattern() {
        assert!(PHONE_PATTERN.is_match("05551234567"));
        assert!(!PHONE_PATTERN.is_match("0555123456"));
        assert!(!PHONE_PATTERN.is_match("055512345678"));
        assert!(!PHONE_PATTERN.is_match("0555-123-45"));
        assert!(!PHONE_PATTERN.is_match("+5551234567"));
    }

    #[test]
    fn test_all_violations_reported_in_form_order() {
        let input = MemberInput {
            username: "x".to_string(),
            name: "y".to_string(),
            email: "nope".to_string(),
            phone_number: "123".to_string(),
            date_of_birth: date(2020, 1, 1),
        };

        let errors = validate_member(&input, today()).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "Username must be between 3 and 20 characters.",
                "Name must be between 3 and 16 characters.",
                "Email format is invalid. Please enter a valid email (e.g., abc@abc.abc).",
                "Phone number must be exactly 11 numeric digits.",
                "Age must be between 18 and 100 years.",
            ]
        );
        assert_eq!(errors.joined().lines().count(), 5);
    }

    #[test]
    fn test_age_exact_anniversary() {
        let today = today();
        for n in [0, 1, 18, 45, 100] {
            let birth = date(today.year() - n, today.month(), today.day());
            assert_eq!(calculate_age(birth, today), n);

            let day_after = birth.succ_opt().unwrap();
            assert_eq!(calculate_age(day_after, today), n - 1);
        }
    }

    #[test]
    fn test_age_range_bounds() {
        let mut input = valid_input();

        input.date_of_birth = date(2006, 6, 1); // 18 today
        assert!(validate_member(&input, today()).is_ok());

        input.date_of_birth = date(2006, 6, 2); // 17
        assert!(validate_member(&input, today()).unwrap_err().has_field("date_of_birth"));

        input.date_of_birth = date(1924, 6, 1); // 100
        assert!(validate_member(&input, today()).is_ok());

        input.date_of_birth = date(1923, 6, 1); // 101
        assert!(validate_member(&input, today()).unwrap_err().has_field("date_of_birth"));
    }

    #[test]
    fn test_leap_day_birthday() {
        let birth = date(2000, 2, 29);

        assert_eq!(calculate_age(birth, date(2018, 2, 27)), 17);
        assert_eq!(calculate_age(birth, date(2018, 2, 28)), 18);
        assert_eq!(calculate_age(birth, date(2020, 2, 28)), 19);
        assert_eq!(calculate_age(birth, date(2020, 2, 29)), 20);
    }

    #[test]
    fn test_future_birth_date_is_rejected() {
        let mut input = valid_input();
        input.date_of_birth = date(2030, 1, 1);

        assert!(calculate_age(input.date_of_birth, today()) < 0);
        assert!(validate_member(&input, today()).is_err());
    }

    #[test]
    fn test_validation_errors_display_is_joined() {
        let mut errors = ValidationErrors::new();
        errors.add("username", "first");
        errors.add("name", "second");

        assert_eq!(errors.to_string(), "first\nsecond");
        assert_eq!(errors.len(), 2);
    }
}
