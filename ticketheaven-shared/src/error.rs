//! Error types for member operations
//!
//! Every action of the form resolves to `MemberResult<T>`. The recoverable
//! kinds (`Validation`, `Duplicate`, `NotFound`) are shown to the user as
//! notices; the rest are driver or input failures that end the action.

use crate::models::member::MemberId;
use crate::validation::ValidationErrors;

/// Result alias for member operations
pub type MemberResult<T> = Result<T, MemberError>;

/// Error type for member operations
#[derive(Debug, thiserror::Error)]
pub enum MemberError {
    /// One or more field rules were violated
    #[error("Validation failed:\n{0}")]
    Validation(ValidationErrors),

    /// Username, email or phone number is already taken (pre-write check)
    #[error("Username, email, or phone number already exists. Please use unique values.")]
    Duplicate,

    /// Update or delete affected no rows
    #[error("No record found with the given ID: {0}")]
    NotFound(MemberId),

    /// The id field did not parse as an integer
    #[error("Invalid member id: {0:?}")]
    InvalidId(String),

    /// The database rejected a write on a unique constraint
    ///
    /// Only reachable when another writer slips in between the duplicate
    /// check and the write.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Any other database or driver failure
    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for MemberError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let constraint = db_err
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());
                return MemberError::Constraint(constraint);
            }
        }

        MemberError::Database(err)
    }
}

impl From<ValidationErrors> for MemberError {
    fn from(errors: ValidationErrors) -> Self {
        MemberError::Validation(errors)
    }
}

/// Parses the raw id field of the form
///
/// # Errors
///
/// Returns `MemberError::InvalidId` if the text is not a 32-bit integer.
///
/// # Example
///
/// ```
/// use ticketheaven_shared::error::parse_member_id;
///
/// assert_eq!(parse_member_id(" 42 ").unwrap(), 42);
/// assert!(parse_member_id("forty-two").is_err());
/// ```
pub fn parse_member_id(raw: &str) -> MemberResult<MemberId> {
    raw.trim()
        .parse::<MemberId>()
        .map_err(|_| MemberError::InvalidId(raw.to_string()))
}
