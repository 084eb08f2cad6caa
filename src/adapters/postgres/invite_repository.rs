//! PostgreSQL implementation of InviteRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, InviteId, Timestamp, UserId, VaultId};
use crate::domain::vault::{Invite, InviteStatus, InviteToken, VaultRole};
use crate::ports::InviteRepository;

use super::vault_repository::db_error;

const INVITE_COLUMNS: &str = "id, vault_id, inviter_id, invitee_email, role, token, status, \
                              expires_at, last_sent_at, accepted_at, created_at";

/// PostgreSQL-backed invite storage.
pub struct PostgresInviteRepository {
    pool: PgPool,
}

impl PostgresInviteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an invite.
#[derive(Debug, sqlx::FromRow)]
struct InviteRow {
    id: Uuid,
    vault_id: Uuid,
    inviter_id: String,
    invitee_email: String,
    role: String,
    token: String,
    status: String,
    expires_at: DateTime<Utc>,
    last_sent_at: DateTime<Utc>,
    accepted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

fn corrupt(column: &str, value: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, value),
    )
}

impl TryFrom<InviteRow> for Invite {
    type Error = DomainError;

    fn try_from(row: InviteRow) -> Result<Self, Self::Error> {
        Ok(Invite {
            id: InviteId::from_uuid(row.id),
            vault_id: VaultId::from_uuid(row.vault_id),
            inviter_id: UserId::new(row.inviter_id.as_str())
                .map_err(|_| corrupt("inviter_id", &row.inviter_id))?,
            role: row
                .role
                .parse::<VaultRole>()
                .map_err(|_| corrupt("role", &row.role))?,
            status: row
                .status
                .parse::<InviteStatus>()
                .map_err(|_| corrupt("status", &row.status))?,
            token: InviteToken::parse(row.token.as_str())
                .map_err(|_| corrupt("token", "<redacted>"))?,
            invitee_email: row.invitee_email,
            expires_at: Timestamp::from_datetime(row.expires_at),
            last_sent_at: Timestamp::from_datetime(row.last_sent_at),
            accepted_at: row.accepted_at.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl InviteRepository for PostgresInviteRepository {
    async fn save(&self, invite: &Invite) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO vault_invites (
                id, vault_id, inviter_id, invitee_email, role, token, status,
                expires_at, last_sent_at, accepted_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            "#,
        )
        .bind(invite.id.as_uuid())
        .bind(invite.vault_id.as_uuid())
        .bind(invite.inviter_id.as_str())
        .bind(&invite.invitee_email)
        .bind(invite.role.as_str())
        .bind(invite.token.as_str())
        .bind(invite.status.as_str())
        .bind(invite.expires_at.as_datetime())
        .bind(invite.last_sent_at.as_datetime())
        .bind(invite.accepted_at.map(|t| *t.as_datetime()))
        .bind(invite.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("vault_invites_token_key") {
                    return DomainError::new(ErrorCode::Conflict, "Invite token already exists");
                }
            }
            db_error("save invite", e)
        })?;

        Ok(())
    }

    async fn update(&self, invite: &Invite) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE vault_invites SET
                status = $2,
                expires_at = $3,
                last_sent_at = $4,
                accepted_at = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(invite.id.as_uuid())
        .bind(invite.status.as_str())
        .bind(invite.expires_at.as_datetime())
        .bind(invite.last_sent_at.as_datetime())
        .bind(invite.accepted_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update invite", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::InviteNotFound, "Invite not found")
                .with_detail("invite_id", invite.id.to_string()));
        }

        Ok(())
    }

    async fn find_by_id(
        &self,
        vault_id: &VaultId,
        invite_id: &InviteId,
    ) -> Result<Option<Invite>, DomainError> {
        let row: Option<InviteRow> = sqlx::query_as(&format!(
            "SELECT {} FROM vault_invites WHERE id = $1 AND vault_id = $2",
            INVITE_COLUMNS
        ))
        .bind(invite_id.as_uuid())
        .bind(vault_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch invite", e))?;

        row.map(Invite::try_from).transpose()
    }

    async fn find_by_token(&self, token: &InviteToken) -> Result<Option<Invite>, DomainError> {
        let row: Option<InviteRow> = sqlx::query_as(&format!(
            "SELECT {} FROM vault_invites WHERE token = $1",
            INVITE_COLUMNS
        ))
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch invite by token", e))?;

        row.map(Invite::try_from).transpose()
    }

    async fn list_for_vault(&self, vault_id: &VaultId) -> Result<Vec<Invite>, DomainError> {
        let rows: Vec<InviteRow> = sqlx::query_as(&format!(
            "SELECT {} FROM vault_invites WHERE vault_id = $1 ORDER BY created_at DESC",
            INVITE_COLUMNS
        ))
        .bind(vault_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list invites", e))?;

        rows.into_iter().map(Invite::try_from).collect()
    }
}
