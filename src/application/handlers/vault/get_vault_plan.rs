//! GetVaultPlanHandler - Query handler for a vault's plan and seat usage.

use std::sync::Arc;

use crate::application::handlers::access::require_role;
use crate::domain::foundation::{UserId, VaultId};
use crate::domain::vault::{SeatUsage, Vault, VaultAction, VaultError};
use crate::ports::{MembershipReader, VaultReader};

/// Query for a vault's plan.
#[derive(Debug, Clone)]
pub struct GetVaultPlanQuery {
    pub vault_id: VaultId,
    pub user_id: UserId,
}

/// Plan details for a vault.
#[derive(Debug, Clone)]
pub struct GetVaultPlanResult {
    pub vault: Vault,
    pub usage: SeatUsage,
}

/// Handler for reading a vault's plan. Any member may read it.
pub struct GetVaultPlanHandler {
    vaults: Arc<dyn VaultReader>,
    memberships: Arc<dyn MembershipReader>,
}

impl GetVaultPlanHandler {
    pub fn new(vaults: Arc<dyn VaultReader>, memberships: Arc<dyn MembershipReader>) -> Self {
        Self {
            vaults,
            memberships,
        }
    }

    pub async fn handle(&self, query: GetVaultPlanQuery) -> Result<GetVaultPlanResult, VaultError> {
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
            "vault plan",
        )
        .await?;

        let usage = vault.seat_usage();
        Ok(GetVaultPlanResult { vault, usage })
    }
}
