//! Member service
//!
//! Runs one form action end to end on top of a [`MemberStore`]:
//!
//! ```text
//! create: validate ─> exists(NewMember)          ─> insert
//! update: validate ─> exists(ExistingMember(id)) ─> update ─> 0 rows? NotFound
//! delete:                                           delete ─> 0 rows? NotFound
//! ```
//!
//! The duplicate check and the write are two separate statements. A writer
//! landing between them is caught by the table's unique constraints and
//! comes back as `MemberError::Constraint`.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ticketheaven_shared::models::member::MemberInput;
//! use ticketheaven_shared::service::MemberService;
//! use ticketheaven_shared::store::InMemoryMemberStore;
//!
//! # async fn example() -> ticketheaven_shared::error::MemberResult<()> {
//! let service = MemberService::new(InMemoryMemberStore::new())
//!     .with_today(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
//!
//! let member = service
//!     .create(&MemberInput {
//!         username: "abc".to_string(),
//!         name: "John".to_string(),
//!         email: "a@b.co".to_string(),
//!         phone_number: "12345678901".to_string(),
//!         date_of_birth: NaiveDate::from_ymd_opt(2004, 6, 1).unwrap(),
//!     })
//!     .await?;
//!
//! service.delete(member.user_id).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::error::{MemberError, MemberResult};
use crate::models::member::{DuplicateScope, Member, MemberId, MemberInput};
use crate::store::MemberStore;
use crate::validation::validate_member;

/// Form actions over a member store
#[derive(Debug)]
pub struct MemberService<S> {
    store: S,
    today: Option<NaiveDate>,
}

impl<S: MemberStore> MemberService<S> {
    /// Creates a service that validates ages against the local date
    pub fn new(store: S) -> Self {
        Self { store, today: None }
    }

    /// Pins the date used for age validation
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub async fn list(&self) -> MemberResult<Vec<Member>> {
        let members = self.store.list_all().await?;
        info!(count = members.len(), "Listed members");
        Ok(members)
    }

    /// Fetches one member
    ///
    /// # Errors
    ///
    /// `MemberError::NotFound` if no row has this id.
    pub async fn find(&self, id: MemberId) -> MemberResult<Member> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(MemberError::NotFound(id))
    }

    /// Validates and inserts a new member
    ///
    /// # Errors
    ///
    /// - `MemberError::Validation` if any field rule fails (nothing is queried)
    /// - `MemberError::Duplicate` if username, email or phone is taken
    /// - `MemberError::Constraint` if the insert loses a race on a unique column
    pub async fn create(&self, input: &MemberInput) -> MemberResult<Member> {
        self.check(input, DuplicateScope::NewMember).await?;

        let member = self.store.insert(input).await?;
        info!(user_id = member.user_id, username = %member.username, "Member created");
        Ok(member)
    }

    /// Validates and overwrites the member with `id`
    ///
    /// # Errors
    ///
    /// As [`MemberService::create`], plus `MemberError::NotFound` when no row
    /// was updated. The duplicate check ignores the member's own row.
    pub async fn update(&self, id: MemberId, input: &MemberInput) -> MemberResult<()> {
        self.check(input, DuplicateScope::ExistingMember(id)).await?;

        let rows_affected = self.store.update(id, input).await?;
        if rows_affected == 0 {
            warn!(user_id = id, "Update matched no member");
            return Err(MemberError::NotFound(id));
        }

        info!(user_id = id, "Member updated");
        Ok(())
    }

    /// Deletes the member with `id`
    ///
    /// # Errors
    ///
    /// `MemberError::NotFound` when no row was deleted.
    pub async fn delete(&self, id: MemberId) -> MemberResult<()> {
        let rows_affected = self.store.delete(id).await?;
        if rows_affected == 0 {
            warn!(user_id = id, "Delete matched no member");
            return Err(MemberError::NotFound(id));
        }

        info!(user_id = id, "Member deleted");
        Ok(())
    }

    /// Checks the field rules only, without touching the store
    ///
    /// # Errors
    ///
    /// `MemberError::Validation` with every violated rule.
    pub fn validate(&self, input: &MemberInput) -> MemberResult<()> {
        validate_member(input, self.today()).map_err(|errors| {
            warn!(violations = errors.len(), "Member input rejected");
            MemberError::from(errors)
        })
    }

    async fn check(&self, input: &MemberInput, scope: DuplicateScope) -> MemberResult<()> {
        self.validate(input)?;

        if self.store.exists(input.probe(), scope).await? {
            warn!(?scope, "Duplicate username, email or phone number");
            return Err(MemberError::Duplicate);
        }

        Ok(())
    }
}
