//! PostgreSQL implementation of VaultReader and VaultRepository.
//!
//! Plan changes are a single conditional UPDATE: the new seat limit is only
//! written when the current member count still fits under it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, VaultId};
use crate::domain::vault::{PlanTier, SeatGuardError, Vault, VaultRole};
use crate::ports::{PlanUpdate, VaultReader, VaultRepository};

/// PostgreSQL-backed vault storage.
pub struct PostgresVaultRepository {
    pool: PgPool,
}

impl PostgresVaultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a vault.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct VaultRow {
    id: Uuid,
    name: String,
    plan_tier: String,
    members_count: i32,
    seats_limit: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VaultRow> for Vault {
    type Error = DomainError;

    fn try_from(row: VaultRow) -> Result<Self, Self::Error> {
        let plan_tier = PlanTier::from_canonical(&row.plan_tier).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid tier value: {}", row.plan_tier),
            )
        })?;

        Ok(Vault {
            id: VaultId::from_uuid(row.id),
            name: row.name,
            plan_tier,
            members_count: to_count(row.members_count, "members_count")?,
            seats_limit: to_count(row.seats_limit, "seats_limit")?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

pub(super) fn to_count(value: i32, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Negative {} value: {}", column, value),
        )
    })
}

pub(super) fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::database(format!("Failed to {}: {}", action, e))
}

pub(super) fn vault_not_found(vault_id: &VaultId) -> DomainError {
    DomainError::new(ErrorCode::VaultNotFound, "Vault not found")
        .with_detail("vault_id", vault_id.to_string())
}

#[async_trait]
impl VaultReader for PostgresVaultRepository {
    async fn get_vault(&self, vault_id: &VaultId) -> Result<Option<Vault>, DomainError> {
        let row: Option<VaultRow> = sqlx::query_as(
            r#"
            SELECT id, name, plan_tier, members_count, seats_limit, created_at, updated_at
            FROM organizations
            WHERE id = $1
            "#,
        )
        .bind(vault_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch vault", e))?;

        row.map(Vault::try_from).transpose()
    }
}

#[async_trait]
impl VaultRepository for PostgresVaultRepository {
    async fn create(&self, vault: &Vault, owner: &UserId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("start transaction", e))?;

        sqlx::query(
            r#"
            INSERT INTO organizations (
                id, name, plan_tier, seats_limit, members_count, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, 1, $5, $6)
            "#,
        )
        .bind(vault.id.as_uuid())
        .bind(&vault.name)
        .bind(vault.plan_tier.as_str())
        .bind(vault.seats_limit as i32)
        .bind(vault.created_at.as_datetime())
        .bind(vault.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("organizations_pkey") {
                    return DomainError::new(ErrorCode::Conflict, "Vault already exists");
                }
            }
            db_error("insert vault", e)
        })?;

        sqlx::query(
            r#"
            INSERT INTO org_memberships (org_id, user_id, role)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(vault.id.as_uuid())
        .bind(owner.as_str())
        .bind(VaultRole::Owner.as_str())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("insert owner membership", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("commit transaction", e))?;

        Ok(())
    }

    async fn update_plan(
        &self,
        vault_id: &VaultId,
        new_tier: PlanTier,
        seats_limit: u32,
    ) -> Result<PlanUpdate, DomainError> {
        let updated: Option<VaultRow> = sqlx::query_as(
            r#"
            UPDATE organizations SET
                plan_tier = $2,
                seats_limit = $3,
                updated_at = NOW()
            WHERE id = $1 AND members_count <= $3
            RETURNING id, name, plan_tier, members_count, seats_limit, created_at, updated_at
            "#,
        )
        .bind(vault_id.as_uuid())
        .bind(new_tier.as_str())
        .bind(seats_limit as i32)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("update plan", e))?;

        if let Some(row) = updated {
            return Ok(PlanUpdate::Applied(Vault::try_from(row)?));
        }

        // Nothing matched: either the vault is gone or it has too many members.
        let members: Option<i32> =
            sqlx::query_scalar("SELECT members_count FROM organizations WHERE id = $1")
                .bind(vault_id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("fetch member count", e))?;

        match members {
            None => Err(vault_not_found(vault_id)),
            Some(count) => Ok(PlanUpdate::Rejected(SeatGuardError::PlanChangeExceedsSeats {
                current_members: to_count(count, "members_count")?,
                limit: seats_limit,
                requested_tier: new_tier,
            })),
        }
    }
}
