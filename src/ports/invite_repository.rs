//! Invite repository port.
//!
//! Persists invitations and looks them up by ID (admin flows) or by token
//! (the invitee's accept link).

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InviteId, VaultId};
use crate::domain::vault::{Invite, InviteToken};

/// Repository port for invite persistence.
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Save a new invite.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the token is already in use
    /// - `DatabaseError` on persistence failure
    async fn save(&self, invite: &Invite) -> Result<(), DomainError>;

    /// Update status, `last_sent_at` and `accepted_at` of an existing invite.
    ///
    /// # Errors
    ///
    /// - `InviteNotFound` if the invite doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, invite: &Invite) -> Result<(), DomainError>;

    /// Find an invite by ID within a vault.
    ///
    /// Returns `None` if no such invite belongs to `vault_id`.
    async fn find_by_id(
        &self,
        vault_id: &VaultId,
        invite_id: &InviteId,
    ) -> Result<Option<Invite>, DomainError>;

    /// Find an invite by its link token.
    async fn find_by_token(&self, token: &InviteToken) -> Result<Option<Invite>, DomainError>;

    /// All invites for a vault, newest first.
    async fn list_for_vault(&self, vault_id: &VaultId) -> Result<Vec<Invite>, DomainError>;
}
