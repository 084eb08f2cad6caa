//! ChangeVaultPlanHandler - Command handler for moving a vault to another tier.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::access::require_role;
use crate::domain::foundation::{UserId, VaultId};
use crate::domain::vault::{PlanTier, SeatUsage, Vault, VaultAction, VaultError};
use crate::ports::{MembershipReader, PlanUpdate, VaultReader, VaultRepository};

/// Command to change a vault's plan tier.
#[derive(Debug, Clone)]
pub struct ChangeVaultPlanCommand {
    pub vault_id: VaultId,
    pub user_id: UserId,
    pub new_tier: PlanTier,
}

/// Result of a successful plan change.
#[derive(Debug, Clone)]
pub struct ChangeVaultPlanResult {
    pub vault: Vault,
    pub previous_tier: PlanTier,
    pub usage: SeatUsage,
}

/// Handler for plan changes. Owner or Admin only.
///
/// The guard runs twice: once against the snapshot for a fast, user-facing
/// answer, and once inside the store's conditional update.
pub struct ChangeVaultPlanHandler {
    reader: Arc<dyn VaultReader>,
    repository: Arc<dyn VaultRepository>,
    memberships: Arc<dyn MembershipReader>,
}

impl ChangeVaultPlanHandler {
    pub fn new(
        reader: Arc<dyn VaultReader>,
        repository: Arc<dyn VaultRepository>,
        memberships: Arc<dyn MembershipReader>,
    ) -> Self {
        Self {
            reader,
            repository,
            memberships,
        }
    }

    pub async fn handle(
        &self,
        cmd: ChangeVaultPlanCommand,
    ) -> Result<ChangeVaultPlanResult, VaultError> {
        // 1. Only Owner/Admin may change plans
        require_role(
            self.memberships.as_ref(),
            &cmd.vault_id,
            &cmd.user_id,
            VaultAction::ManageSettings,
            "plan settings",
        )
        .await?;

        // 2. Load current state
        let mut vault = self
            .reader
            .get_vault(&cmd.vault_id)
            .await?
            .ok_or(VaultError::VaultNotFound)?;
        let previous_tier = vault.plan_tier;

        // 3. Pre-check against the snapshot
        if let Err(e) = vault.change_plan(cmd.new_tier) {
            warn!(
                vault_id = %cmd.vault_id,
                tier = %cmd.new_tier,
                members_count = e.current_members(),
                "plan change rejected"
            );
            return Err(e.into());
        }

        // 4. Conditional write
        let vault = match self
            .repository
            .update_plan(&cmd.vault_id, cmd.new_tier, vault.seats_limit)
            .await?
        {
            PlanUpdate::Applied(vault) => vault,
            PlanUpdate::Rejected(e) => {
                warn!(
                    vault_id = %cmd.vault_id,
                    tier = %cmd.new_tier,
                    members_count = e.current_members(),
                    "plan change rejected at write time"
                );
                return Err(e.into());
            }
        };

        info!(
            vault_id = %cmd.vault_id,
            from = %previous_tier,
            tier = %vault.plan_tier,
            members_count = vault.members_count,
            "vault plan changed"
        );

        let usage = vault.seat_usage();
        Ok(ChangeVaultPlanResult {
            vault,
            previous_tier,
            usage,
        })
    }
}
