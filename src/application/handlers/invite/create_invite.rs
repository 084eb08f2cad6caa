//! CreateInviteHandler - Command handler for inviting someone to a vault.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::handlers::access::require_role;
use crate::domain::foundation::{AuthenticatedUser, Timestamp, VaultId};
use crate::domain::vault::{Invite, VaultAction, VaultError, VaultRole};
use crate::ports::{InviteEmail, InviteNotifier, InviteRepository, MembershipReader, VaultReader};

use super::InviteSettings;

#[derive(Debug, Clone)]
pub struct CreateInviteCommand {
    pub vault_id: VaultId,
    pub inviter: AuthenticatedUser,
    pub invitee_email: String,
    pub role: Option<VaultRole>,
    pub expiry_hours: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct CreateInviteResult {
    pub invite: Invite,
    pub invite_url: String,
    /// False when the email could not be delivered. The invite still exists.
    pub email_sent: bool,
}

/// Handler for creating invites. Owner or Admin only.
///
/// Refuses up front when the vault is already full, so nobody is emailed an
/// invite that cannot be accepted. The seat is not reserved; acceptance
/// re-checks capacity.
pub struct CreateInviteHandler {
    vaults: Arc<dyn VaultReader>,
    memberships: Arc<dyn MembershipReader>,
    invites: Arc<dyn InviteRepository>,
    notifier: Arc<dyn InviteNotifier>,
    settings: InviteSettings,
}

impl CreateInviteHandler {
    pub fn new(
        vaults: Arc<dyn VaultReader>,
        memberships: Arc<dyn MembershipReader>,
        invites: Arc<dyn InviteRepository>,
        notifier: Arc<dyn InviteNotifier>,
        settings: InviteSettings,
    ) -> Self {
        Self {
            vaults,
            memberships,
            invites,
            notifier,
            settings,
        }
    }

    pub async fn handle(&self, cmd: CreateInviteCommand) -> Result<CreateInviteResult, VaultError> {
        // 1. Only Owner/Admin may invite
        require_role(
            self.memberships.as_ref(),
            &cmd.vault_id,
            &cmd.inviter.id,
            VaultAction::ManageMembers,
            "invites",
        )
        .await?;

        let role = cmd.role.unwrap_or_default();
        if role == VaultRole::Owner {
            return Err(VaultError::validation(
                "role",
                "Invites cannot grant the OWNER role",
            ));
        }

        // 2. Vault must exist and have a free seat
        let vault = self
            .vaults
            .get_vault(&cmd.vault_id)
            .await?
            .ok_or(VaultError::VaultNotFound)?;

        if let Err(e) = vault.ensure_seat_available() {
            warn!(
                vault_id = %vault.id,
                tier = %vault.plan_tier,
                members_count = vault.members_count,
                "invite refused: vault full"
            );
            return Err(e.into());
        }

        // 3. Issue and persist
        let expiry_hours = cmd
            .expiry_hours
            .unwrap_or(self.settings.default_expiry_hours);
        let invite = Invite::issue(
            vault.id,
            cmd.inviter.id.clone(),
            &cmd.invitee_email,
            role,
            expiry_hours,
            Timestamp::now(),
        )?;
        self.invites.save(&invite).await?;

        let invite_url = invite.url(&self.settings.app_url);

        // 4. Email; failure is logged, not returned
        let email = InviteEmail {
            vault_name: vault.name.clone(),
            inviter_name: cmd.inviter.display_name_or_email().to_string(),
            invitee_email: invite.invitee_email.clone(),
            invite_url: invite_url.clone(),
            expiry_hours,
        };
        let email_sent = match self.notifier.send_invite(&email).await {
            Ok(()) => true,
            Err(e) => {
                warn!(invite_id = %invite.id, error = %e, "failed to send invite email");
                false
            }
        };

        info!(
            vault_id = %vault.id,
            invite_id = %invite.id,
            role = %invite.role,
            expiry_hours,
            "invite created"
        );

        Ok(CreateInviteResult {
            invite,
            invite_url,
            email_sent,
        })
    }
}
