//! In-memory member store
//!
//! Behaves like the `member` table: ids come from a serial counter that
//! never reuses values, and the three unique columns are enforced on every
//! write with a constraint error, the way Postgres would reject them.

use std::sync::Mutex;

use async_trait::async_trait;

use super::MemberStore;
use crate::error::{MemberError, MemberResult};
use crate::models::member::{DuplicateProbe, DuplicateScope, Member, MemberId, MemberInput};

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Member>,
    last_id: MemberId,
}

impl Table {
    fn conflict(&self, probe: &DuplicateProbe<'_>, skip: Option<MemberId>) -> Option<&'static str> {
        self.rows
            .iter()
            .filter(|row| Some(row.user_id) != skip)
            .find_map(|row| {
                if row.username == probe.username {
                    Some("member_username_key")
                } else if row.email == probe.email {
                    Some("member_email_key")
                } else if row.phone_number == probe.phone_number {
                    Some("member_phonenumber_key")
                } else {
                    None
                }
            })
    }
}

/// Member store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryMemberStore {
    table: Mutex<Table>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `inputs`, ids assigned from 1
    pub fn with_members(inputs: &[MemberInput]) -> Self {
        let mut table = Table::default();
        for input in inputs {
            table.last_id += 1;
            table.rows.push(Member::from_input(table.last_id, input));
        }

        Self {
            table: Mutex::new(table),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Table> {
        self.table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MemberStore for InMemoryMemberStore {
    async fn list_all(&self) -> MemberResult<Vec<Member>> {
        Ok(self.lock().rows.clone())
    }

    async fn find_by_id(&self, id: MemberId) -> MemberResult<Option<Member>> {
        Ok(self.lock().rows.iter().find(|row| row.user_id == id).cloned())
    }

    async fn exists(&self, probe: DuplicateProbe<'_>, scope: DuplicateScope) -> MemberResult<bool> {
        let table = self.lock();
        let skip = scope.excluded_id();

        Ok(table
            .rows
            .iter()
            .filter(|row| Some(row.user_id) != skip)
            .any(|row| row.probe().collides_with(&probe)))
    }

    async fn insert(&self, input: &MemberInput) -> MemberResult<Member> {
        let mut table = self.lock();

        // Serial values are consumed even when the insert fails
        table.last_id += 1;
        if let Some(constraint) = table.conflict(&input.probe(), None) {
            return Err(MemberError::Constraint(constraint.to_string()));
        }

        let member = Member::from_input(table.last_id, input);
        table.rows.push(member.clone());
        Ok(member)
    }

    async fn update(&self, id: MemberId, input: &MemberInput) -> MemberResult<u64> {
        let mut table = self.lock();

        let Some(index) = table.rows.iter().position(|row| row.user_id == id) else {
            return Ok(0);
        };

        if let Some(constraint) = table.conflict(&input.probe(), Some(id)) {
            return Err(MemberError::Constraint(constraint.to_string()));
        }

        table.rows[index] = Member::from_input(id, input);
        Ok(1)
    }

    async fn delete(&self, id: MemberId) -> MemberResult<u64> {
        let mut table = self.lock();
        let before = table.rows.len();
        table.rows.retain(|row| row.user_id != id);
        Ok((before - table.rows.len()) as u64)
    }
}
