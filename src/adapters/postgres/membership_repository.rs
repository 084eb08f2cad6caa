//! PostgreSQL implementation of MembershipReader and MembershipRepository.
//!
//! Seat claims lock the vault row for the duration of the transaction so the
//! member count read and the insert cannot interleave with another claim.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, UserId, VaultId};
use crate::domain::vault::{SeatGuardError, VaultRole};
use crate::ports::{MembershipReader, MembershipRepository, SeatClaim};

use super::vault_repository::{db_error, to_count, vault_not_found};

/// PostgreSQL-backed membership storage.
pub struct PostgresMembershipRepository {
    pool: PgPool,
}

impl PostgresMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn parse_role(s: &str) -> Result<VaultRole, DomainError> {
    s.parse::<VaultRole>().map_err(|_| {
        DomainError::new(ErrorCode::DatabaseError, format!("Invalid role value: {}", s))
    })
}

#[async_trait]
impl MembershipReader for PostgresMembershipRepository {
    async fn role_of(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
    ) -> Result<Option<VaultRole>, DomainError> {
        let role: Option<String> = sqlx::query_scalar(
            "SELECT role FROM org_memberships WHERE org_id = $1 AND user_id = $2",
        )
        .bind(vault_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch membership role", e))?;

        role.as_deref().map(parse_role).transpose()
    }
}

#[async_trait]
impl MembershipRepository for PostgresMembershipRepository {
    async fn add_member_within_limit(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
        role: VaultRole,
    ) -> Result<SeatClaim, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        let seats: Option<(i32, i32)> = sqlx::query_as(
            "SELECT members_count, seats_limit FROM organizations WHERE id = $1 FOR UPDATE",
        )
        .bind(vault_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("lock vault", e))?;

        let (members_count, seats_limit) = match seats {
            Some((members, limit)) => (
                to_count(members, "members_count")?,
                to_count(limit, "seats_limit")?,
            ),
            None => return Err(vault_not_found(vault_id)),
        };

        let existing: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM org_memberships WHERE org_id = $1 AND user_id = $2",
        )
        .bind(vault_id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("check membership", e))?;

        if existing.is_some() {
            return Ok(SeatClaim::AlreadyMember);
        }

        if members_count >= seats_limit {
            return Ok(SeatClaim::Rejected(SeatGuardError::SeatLimitReached {
                current_members: members_count,
                limit: seats_limit,
            }));
        }

        sqlx::query(
            r#"
            INSERT INTO org_memberships (org_id, user_id, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(vault_id.as_uuid())
        .bind(user_id.as_str())
        .bind(role.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert membership", e))?;

        let new_count: i32 = sqlx::query_scalar(
            r#"
            UPDATE organizations SET
                members_count = members_count + 1,
                updated_at = NOW()
            WHERE id = $1
            RETURNING members_count
            "#,
        )
        .bind(vault_id.as_uuid())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("increment member count", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        Ok(SeatClaim::Added {
            members_count: to_count(new_count, "members_count")?,
        })
    }

    async fn remove_member(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        let result = sqlx::query("DELETE FROM org_memberships WHERE org_id = $1 AND user_id = $2")
            .bind(vault_id.as_uuid())
            .bind(user_id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("delete membership", e))?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query(
            r#"
            UPDATE organizations SET
                members_count = GREATEST(members_count - 1, 0),
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(vault_id.as_uuid())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("decrement member count", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        Ok(true)
    }
}
