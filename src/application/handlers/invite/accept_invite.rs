//! AcceptInviteHandler - Command handler for joining a vault through an invite.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{AuthenticatedUser, Timestamp, VaultId};
use crate::domain::vault::{InviteError, InviteStatus, InviteToken, VaultError};
use crate::ports::{InviteRepository, MembershipReader, MembershipRepository, SeatClaim, VaultReader};

#[derive(Debug, Clone)]
pub struct AcceptInviteCommand {
    pub token: String,
    pub user: AuthenticatedUser,
}

/// How an accepted (or already-settled) invite resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptOutcome {
    Joined { members_count: u32 },
    AlreadyAccepted,
    AlreadyMember,
}

#[derive(Debug, Clone)]
pub struct AcceptInviteResult {
    pub vault_id: VaultId,
    pub vault_name: Option<String>,
    pub outcome: AcceptOutcome,
}

/// Handler for accepting invites.
///
/// # Order of checks
///
/// 1. Caller's email is verified
/// 2. Token resolves to an invite
/// 3. Already accepted → success, nothing to do
/// 4. Not revoked, not expired
/// 5. Caller's email matches the invitee
/// 6. Already a member → success, nothing to do
/// 7. Seat available (snapshot), then claimed atomically at the store
///
/// The invite is marked accepted after the seat is claimed. If that write
/// fails it is logged and the call still succeeds; the invite stays pending
/// and a retry with the same token resolves to `AlreadyMember`.
pub struct AcceptInviteHandler {
    vaults: Arc<dyn VaultReader>,
    memberships: Arc<dyn MembershipReader>,
    members: Arc<dyn MembershipRepository>,
    invites: Arc<dyn InviteRepository>,
}

impl AcceptInviteHandler {
    pub fn new(
        vaults: Arc<dyn VaultReader>,
        memberships: Arc<dyn MembershipReader>,
        members: Arc<dyn MembershipRepository>,
        invites: Arc<dyn InviteRepository>,
    ) -> Self {
        Self {
            vaults,
            memberships,
            members,
            invites,
        }
    }

    pub async fn handle(&self, cmd: AcceptInviteCommand) -> Result<AcceptInviteResult, VaultError> {
        if !cmd.user.email_verified {
            return Err(InviteError::EmailNotVerified.into());
        }

        let token = InviteToken::parse(cmd.token).map_err(|_| VaultError::InviteNotFound)?;
        let mut invite = self
            .invites
            .find_by_token(&token)
            .await?
            .ok_or(VaultError::InviteNotFound)?;
        let vault_id = invite.vault_id;

        match invite.status {
            InviteStatus::Accepted => {
                return Ok(AcceptInviteResult {
                    vault_id,
                    vault_name: None,
                    outcome: AcceptOutcome::AlreadyAccepted,
                })
            }
            InviteStatus::Revoked => return Err(InviteError::Revoked.into()),
            InviteStatus::Pending => {}
        }

        let now = Timestamp::now();
        if invite.is_expired(now) {
            return Err(InviteError::Expired.into());
        }

        if !invite.is_addressed_to(&cmd.user.email) {
            return Err(InviteError::EmailMismatch {
                invitee_email: invite.invitee_email.clone(),
            }
            .into());
        }

        if self.memberships.is_member(&vault_id, &cmd.user.id).await? {
            return Ok(AcceptInviteResult {
                vault_id,
                vault_name: None,
                outcome: AcceptOutcome::AlreadyMember,
            });
        }

        let vault = self
            .vaults
            .get_vault(&vault_id)
            .await?
            .ok_or(VaultError::VaultNotFound)?;
        vault.ensure_seat_available()?;

        let members_count = match self
            .members
            .add_member_within_limit(&vault_id, &cmd.user.id, invite.role)
            .await?
        {
            SeatClaim::Added { members_count } => members_count,
            SeatClaim::AlreadyMember => {
                return Ok(AcceptInviteResult {
                    vault_id,
                    vault_name: Some(vault.name),
                    outcome: AcceptOutcome::AlreadyMember,
                })
            }
            SeatClaim::Rejected(e) => {
                warn!(
                    vault_id = %vault_id,
                    members_count = e.current_members(),
                    "invite acceptance rejected: vault full"
                );
                return Err(e.into());
            }
        };

        invite.accept(now)?;
        if let Err(e) = self.invites.update(&invite).await {
            warn!(invite_id = %invite.id, error = %e, "failed to mark invite accepted");
        }

        info!(
            vault_id = %vault_id,
            invite_id = %invite.id,
            user_id = %cmd.user.id,
            role = %invite.role,
            members_count,
            "invite accepted"
        );

        Ok(AcceptInviteResult {
            vault_id,
            vault_name: Some(vault.name),
            outcome: AcceptOutcome::Joined { members_count },
        })
    }
}
