//! PostgreSQL member gateway
//!
//! Every statement binds user-supplied values as parameters. Each operation
//! acquires its own connection from the pool and returns it when the
//! operation ends, so no connection state is shared between form actions.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use super::MemberStore;
use crate::error::MemberResult;
use crate::models::member::{DuplicateProbe, DuplicateScope, Member, MemberId, MemberInput};

const SELECT_ALL: &str = r#"
    SELECT userid, username, name, email, phonenumber, dateofbirth
    FROM member
"#;

const SELECT_BY_ID: &str = r#"
    SELECT userid, username, name, email, phonenumber, dateofbirth
    FROM member
    WHERE userid = $1
"#;

const EXISTS_ANY: &str = r#"
    SELECT EXISTS (
        SELECT 1 FROM member
        WHERE (username = $1 OR email = $2 OR phonenumber = $3)
    )
"#;

const EXISTS_OTHER: &str = r#"
    SELECT EXISTS (
        SELECT 1 FROM member
        WHERE (username = $1 OR email = $2 OR phonenumber = $3)
          AND userid <> $4
    )
"#;

const INSERT: &str = r#"
    INSERT INTO member (username, name, email, phonenumber, dateofbirth)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING userid, username, name, email, phonenumber, dateofbirth
"#;

const UPDATE: &str = r#"
    UPDATE member
    SET username = $2, name = $3, email = $4, phonenumber = $5, dateofbirth = $6
    WHERE userid = $1
"#;

const DELETE: &str = "DELETE FROM member WHERE userid = $1";

/// Member gateway backed by a PostgreSQL pool
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct PgMemberGateway {
    pool: PgPool,
}

impl PgMemberGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberStore for PgMemberGateway {
    async fn list_all(&self) -> MemberResult<Vec<Member>> {
        let mut conn = self.pool.acquire().await?;

        let members = sqlx::query_as::<_, Member>(SELECT_ALL)
            .fetch_all(&mut *conn)
            .await?;

        debug!(count = members.len(), "Listed members");
        Ok(members)
    }

    async fn find_by_id(&self, id: MemberId) -> MemberResult<Option<Member>> {
        let mut conn = self.pool.acquire().await?;

        let member = sqlx::query_as::<_, Member>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(member)
    }

    async fn exists(&self, probe: DuplicateProbe<'_>, scope: DuplicateScope) -> MemberResult<bool> {
        let mut conn = self.pool.acquire().await?;

        let found: bool = match scope {
            DuplicateScope::NewMember => {
                sqlx::query_scalar(EXISTS_ANY)
                    .bind(probe.username)
                    .bind(probe.email)
                    .bind(probe.phone_number)
                    .fetch_one(&mut *conn)
                    .await?
            }
            DuplicateScope::ExistingMember(id) => {
                sqlx::query_scalar(EXISTS_OTHER)
                    .bind(probe.username)
                    .bind(probe.email)
                    .bind(probe.phone_number)
                    .bind(id)
                    .fetch_one(&mut *conn)
                    .await?
            }
        };

        debug!(?scope, found, "Duplicate check");
        Ok(found)
    }

    async fn insert(&self, input: &MemberInput) -> MemberResult<Member> {
        let mut conn = self.pool.acquire().await?;

        let member = sqlx::query_as::<_, Member>(INSERT)
            .bind(&input.username)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(input.date_of_birth)
            .fetch_one(&mut *conn)
            .await?;

        debug!(user_id = member.user_id, "Inserted member");
        Ok(member)
    }

    async fn update(&self, id: MemberId, input: &MemberInput) -> MemberResult<u64> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(UPDATE)
            .bind(id)
            .bind(&input.username)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(input.date_of_birth)
            .execute(&mut *conn)
            .await?;

        debug!(user_id = id, rows_affected = result.rows_affected(), "Updated member");
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: MemberId) -> MemberResult<u64> {
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(DELETE).bind(id).execute(&mut *conn).await?;

        debug!(user_id = id, rows_affected = result.rows_affected(), "Deleted member");
        Ok(result.rows_affected())
    }
}
