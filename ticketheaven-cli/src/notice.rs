//! Titled notices shown after each form action
//!
//! Every action ends with exactly one notice (or a member listing). Error
//! notices go to stderr and make the process exit with status 1.

use std::fmt;

use ticketheaven_shared::error::MemberError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Information,
    Error,
}

/// A message with a title, like a message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: &'static str,
    pub message: String,
}

impl Notice {
    pub fn info(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Information,
            title,
            message: message.into(),
        }
    }

    pub fn error(title: &'static str, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title,
            message: message.into(),
        }
    }

    pub fn created() -> Self {
        Self::info("Success", "User insertion has been done successfully.")
    }

    pub fn updated() -> Self {
        Self::info("Success", "User has been updated successfully.")
    }

    pub fn deleted() -> Self {
        Self::info("Success", "Record has been deleted successfully.")
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl From<&MemberError> for Notice {
    fn from(err: &MemberError) -> Self {
        match err {
            MemberError::Validation(errors) => Notice::error("Validation Errors", errors.joined()),
            MemberError::Duplicate => Notice::error(
                "Duplicate Entry",
                "Username, email, or phone number already exists. Please use unique values.",
            ),
            MemberError::NotFound(_) => Notice::error("Error", "No record found with the given ID."),
            MemberError::InvalidId(raw) => {
                Notice::error("Error", format!("The ID must be a whole number, got {:?}.", raw))
            }
            MemberError::Constraint(constraint) => Notice::error(
                "Database Error",
                format!("The database rejected the change ({}).", constraint),
            ),
            MemberError::Database(db_err) => Notice::error("Database Error", db_err.to_string()),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.title)?;
        write!(f, "{}", self.message)
    }
}
