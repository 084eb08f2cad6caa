//! CheckCanInviteHandler - Query handler for whether a vault has a free seat.

use std::sync::Arc;

use crate::application::handlers::access::require_role;
use crate::domain::foundation::{UserId, VaultId};
use crate::domain::vault::{SeatUsage, VaultAction, VaultError};
use crate::ports::{MembershipReader, VaultReader};

#[derive(Debug, Clone)]
pub struct CheckCanInviteQuery {
    pub vault_id: VaultId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct CheckCanInviteResult {
    pub usage: SeatUsage,
}

/// Answers "can this vault take another member" from the capacity
/// calculator alone. No guard is invoked and nothing is reserved.
pub struct CheckCanInviteHandler {
    vaults: Arc<dyn VaultReader>,
    memberships: Arc<dyn MembershipReader>,
}

impl CheckCanInviteHandler {
    pub fn new(vaults: Arc<dyn VaultReader>, memberships: Arc<dyn MembershipReader>) -> Self {
        Self {
            vaults,
            memberships,
        }
    }

    pub async fn handle(
        &self,
        query: CheckCanInviteQuery,
    ) -> Result<CheckCanInviteResult, VaultError> {
        let vault = self
            .vaults
            .get_vault(&query.vault_id)
            .await?
            .ok_or(VaultError::VaultNotFound)?;

        require_role(
            self.memberships.as_ref(),
            &query.vault_id,
            &query.user_id,
            VaultAction::View,
            "members",
        )
        .await?;

        Ok(CheckCanInviteResult {
            usage: vault.seat_usage(),
        })
    }
}
