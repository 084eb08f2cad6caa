//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresVaultRepository` - Vault reads and conditional plan updates
//! - `PostgresMembershipRepository` - Roles and row-locked seat claims
//! - `PostgresInviteRepository` - Invite persistence
//!
//! Schema lives in `migrations/` and is applied with [`run_migrations`].

mod invite_repository;
mod membership_repository;
mod vault_repository;

pub use invite_repository::PostgresInviteRepository;
pub use membership_repository::PostgresMembershipRepository;
pub use vault_repository::PostgresVaultRepository;

use sqlx::PgPool;

use crate::domain::foundation::DomainError;

/// Applies pending schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))
}
