//! Member model
//!
//! A member is one registered person. Rows live in a single `member` table;
//! the id is assigned by the database and the other five columns come
//! straight from the form.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE member (
//!     userid      SERIAL PRIMARY KEY,
//!     username    TEXT NOT NULL UNIQUE,
//!     name        TEXT NOT NULL,
//!     email       TEXT NOT NULL UNIQUE,
//!     phonenumber TEXT NOT NULL UNIQUE,
//!     dateofbirth DATE NOT NULL
//! );
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::validation::{EMAIL_PATTERN, PHONE_PATTERN};

/// Primary key of the `member` table (`SERIAL`)
pub type MemberId = i32;

/// A stored member row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Member {
    /// Database-assigned id
    #[sqlx(rename = "userid")]
    pub user_id: MemberId,

    /// Login name, unique across members
    pub username: String,

    /// Display name
    pub name: String,

    /// Email address, unique across members
    pub email: String,

    /// Phone number (11 digits), unique across members
    #[sqlx(rename = "phonenumber")]
    pub phone_number: String,

    #[sqlx(rename = "dateofbirth")]
    pub date_of_birth: NaiveDate,
}

impl Member {
    /// Builds a row from an id and the form values it was written with
    pub fn from_input(user_id: MemberId, input: &MemberInput) -> Self {
        Self {
            user_id,
            username: input.username.clone(),
            name: input.name.clone(),
            email: input.email.clone(),
            phone_number: input.phone_number.clone(),
            date_of_birth: input.date_of_birth,
        }
    }

    /// The unique fields of this row, for duplicate matching
    pub fn probe(&self) -> DuplicateProbe<'_> {
        DuplicateProbe {
            username: &self.username,
            email: &self.email,
            phone_number: &self.phone_number,
        }
    }
}

/// Values entered in the form for an insert or update
///
/// The length and pattern rules are declared here; the age rule needs the
/// current date and lives in [`crate::validation::validate_member`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MemberInput {
    #[validate(length(min = 3, max = 20, message = "Username must be between 3 and 20 characters."))]
    pub username: String,

    #[validate(length(min = 3, max = 16, message = "Name must be between 3 and 16 characters."))]
    pub name: String,

    #[validate(regex(
        path = *EMAIL_PATTERN,
        message = "Email format is invalid. Please enter a valid email (e.g., abc@abc.abc)."
    ))]
    pub email: String,

    #[validate(regex(path = *PHONE_PATTERN, message = "Phone number must be exactly 11 numeric digits."))]
    pub phone_number: String,

    pub date_of_birth: NaiveDate,
}

impl MemberInput {
    /// The unique fields of this input, for the pre-write duplicate check
    pub fn probe(&self) -> DuplicateProbe<'_> {
        DuplicateProbe {
            username: &self.username,
            email: &self.email,
            phone_number: &self.phone_number,
        }
    }
}

/// The three fields that must be unique across members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateProbe<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub phone_number: &'a str,
}

impl DuplicateProbe<'_> {
    /// True if any of the three fields matches the other probe
    pub fn collides_with(&self, other: &DuplicateProbe<'_>) -> bool {
        self.username == other.username
            || self.email == other.email
            || self.phone_number == other.phone_number
    }
}

/// Which rows a duplicate check compares against
///
/// A new member must not collide with any row. An existing member is
/// allowed to keep its own values, so its row is left out of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateScope {
    NewMember,
    ExistingMember(MemberId),
}

impl DuplicateScope {
    /// The id excluded from the match, if any
    pub fn excluded_id(&self) -> Option<MemberId> {
        match self {
            DuplicateScope::NewMember => None,
            DuplicateScope::ExistingMember(id) => Some(*id),
        }
    }
}
