//! Database models for TicketHeaven
//!
//! # Models
//!
//! - `member`: Registered members and the form input used to write them
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ticketheaven_shared::models::member::MemberInput;
//!
//! let input = MemberInput {
//!     username: "jdoe".to_string(),
//!     name: "John Doe".to_string(),
//!     email: "john@example.com".to_string(),
//!     phone_number: "05551234567".to_string(),
//!     date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
//! };
//! assert_eq!(input.username, "jdoe");
//! ```

pub mod member;
