//! RemoveMemberHandler - Command handler for freeing a seat.

use std::sync::Arc;

use tracing::info;

use crate::application::handlers::access::require_role;
use crate::domain::foundation::{UserId, VaultId};
use crate::domain::vault::{SeatUsage, VaultAction, VaultError, VaultRole};
use crate::ports::{MembershipReader, MembershipRepository, VaultReader};

#[derive(Debug, Clone)]
pub struct RemoveMemberCommand {
    pub vault_id: VaultId,
    pub user_id: UserId,
    pub member_id: UserId,
}

#[derive(Debug, Clone)]
pub struct RemoveMemberResult {
    pub usage: SeatUsage,
}

/// Removes a member from a vault. Owner or Admin only; the owner cannot be
/// removed.
pub struct RemoveMemberHandler {
    vaults: Arc<dyn VaultReader>,
    memberships: Arc<dyn MembershipReader>,
    repository: Arc<dyn MembershipRepository>,
}

impl RemoveMemberHandler {
    pub fn new(
        vaults: Arc<dyn VaultReader>,
        memberships: Arc<dyn MembershipReader>,
        repository: Arc<dyn MembershipRepository>,
    ) -> Self {
        Self {
            vaults,
            memberships,
            repository,
        }
    }

    pub async fn handle(&self, cmd: RemoveMemberCommand) -> Result<RemoveMemberResult, VaultError> {
        require_role(
            self.memberships.as_ref(),
            &cmd.vault_id,
            &cmd.user_id,
            VaultAction::ManageMembers,
            "members",
        )
        .await?;

        match self.memberships.role_of(&cmd.vault_id, &cmd.member_id).await? {
            None => return Err(VaultError::MemberNotFound),
            Some(VaultRole::Owner) => {
                return Err(VaultError::forbidden("The vault owner cannot be removed"))
            }
            Some(_) => {}
        }

        if !self
            .repository
            .remove_member(&cmd.vault_id, &cmd.member_id)
            .await?
        {
            return Err(VaultError::MemberNotFound);
        }

        let vault = self
            .vaults
            .get_vault(&cmd.vault_id)
            .await?
            .ok_or(VaultError::VaultNotFound)?;

        info!(
            vault_id = %cmd.vault_id,
            member = %cmd.member_id,
            members_count = vault.members_count,
            "member removed"
        );

        Ok(RemoveMemberResult {
            usage: vault.seat_usage(),
        })
    }
}
