//! Record gateway for the `member` table
//!
//! The [`MemberStore`] trait is the contract every backend implements. The
//! service layer only talks to this trait, so the same validate → check →
//! write flow runs against Postgres in production and against memory in
//! tests.
//!
//! # Backends
//!
//! - [`PgMemberGateway`]: PostgreSQL via sqlx, bound parameters only
//! - [`InMemoryMemberStore`]: `Mutex<Vec<Member>>` with serial ids
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ticketheaven_shared::models::member::{DuplicateScope, MemberInput};
//! use ticketheaven_shared::store::{InMemoryMemberStore, MemberStore};
//!
//! # async fn example() -> ticketheaven_shared::error::MemberResult<()> {
//! let store = InMemoryMemberStore::new();
//! let input = MemberInput {
//!     username: "abc".to_string(),
//!     name: "John".to_string(),
//!     email: "a@b.co".to_string(),
//!     phone_number: "12345678901".to_string(),
//!     date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
//! };
//!
//! let member = store.insert(&input).await?;
//! assert!(store.exists(input.probe(), DuplicateScope::NewMember).await?);
//! assert!(!store.exists(input.probe(), DuplicateScope::ExistingMember(member.user_id)).await?);
//! # Ok(())
//! # }
//! ```

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::MemberResult;
use crate::models::member::{DuplicateProbe, DuplicateScope, Member, MemberId, MemberInput};

pub use memory::InMemoryMemberStore;
pub use postgres::PgMemberGateway;

/// Persistence operations on members
#[async_trait]
pub trait MemberStore: Send + Sync {
    /// All rows, in the backend's default order
    async fn list_all(&self) -> MemberResult<Vec<Member>>;

    /// Looks up one row by id
    async fn find_by_id(&self, id: MemberId) -> MemberResult<Option<Member>>;

    /// True if any row in `scope` shares username, email or phone number
    /// with `probe`
    async fn exists(&self, probe: DuplicateProbe<'_>, scope: DuplicateScope) -> MemberResult<bool>;

    /// Inserts a new row and returns it with its assigned id
    ///
    /// # Errors
    ///
    /// Returns `MemberError::Constraint` if a unique column collides. The
    /// store does not run the duplicate check itself.
    async fn insert(&self, input: &MemberInput) -> MemberResult<Member>;

    /// Overwrites the row with `id`, returning the affected-row count
    async fn update(&self, id: MemberId, input: &MemberInput) -> MemberResult<u64>;

    /// Deletes the row with `id`, returning the affected-row count
    async fn delete(&self, id: MemberId) -> MemberResult<u64>;
}
