//! Vault repository port (write side).
//!
//! # Design
//!
//! - **Store is the final authority**: `update_plan` re-checks capacity
//!   atomically, so a member added between the caller's guard check and the
//!   write cannot push the vault over its new limit
//! - **Same failure, either way**: a rejection at the store is reported with
//!   the same `SeatGuardError` the pure guard would have produced

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, VaultId};
use crate::domain::vault::{PlanTier, SeatGuardError, Vault};

/// Outcome of a conditional plan update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanUpdate {
    /// The tier and limit were written. Carries the updated vault.
    Applied(Vault),

    /// The member count at write time exceeded the new limit.
    Rejected(SeatGuardError),
}

/// Repository port for vault persistence.
#[async_trait]
pub trait VaultRepository: Send + Sync {
    /// Persist a new vault and register `owner` as its first member with the
    /// `OWNER` role.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, vault: &Vault, owner: &UserId) -> Result<(), DomainError>;

    /// Set the plan tier and seat limit, provided the vault's member count at
    /// write time is at most `seats_limit`.
    ///
    /// # Errors
    ///
    /// - `VaultNotFound` if the vault doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update_plan(
        &self,
        vault_id: &VaultId,
        new_tier: PlanTier,
        seats_limit: u32,
    ) -> Result<PlanUpdate, DomainError>;
}
