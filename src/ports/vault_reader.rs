//! Vault reader port (read side).
//!
//! Supplies the snapshot the capacity calculator and guards work from:
//! the vault's current tier and member count.
//!
//! # Example
//!
//! ```ignore
//! async fn remaining(reader: &dyn VaultReader, id: &VaultId) -> Option<u32> {
//!     let vault = reader.get_vault(id).await.ok()??;
//!     Some(vault.seat_usage().seats_remaining)
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, VaultId};
use crate::domain::vault::Vault;

/// Reader port for vault snapshots.
///
/// The returned member count may be stale by the time the caller acts on it.
/// Writes that depend on it go through the conditional operations on
/// `VaultRepository` and `MembershipRepository`.
#[async_trait]
pub trait VaultReader: Send + Sync {
    /// Get a vault by ID.
    ///
    /// Returns `None` if the vault does not exist.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on read failure, or when the stored tier is not a
    ///   known tier
    async fn get_vault(&self, vault_id: &VaultId) -> Result<Option<Vault>, DomainError>;
}
