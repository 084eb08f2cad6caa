//! ResendInviteHandler - Command handler for re-sending an invite email.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::application::handlers::access::require_role;
use crate::domain::foundation::{AuthenticatedUser, InviteId, Timestamp, VaultId};
use crate::domain::vault::{Invite, VaultAction, VaultError};
use crate::ports::{InviteEmail, InviteNotifier, InviteRepository, MembershipReader, VaultReader};

use super::{InviteSettings, FALLBACK_INVITER_NAME};

#[derive(Debug, Clone)]
pub struct ResendInviteCommand {
    pub vault_id: VaultId,
    pub invite_id: InviteId,
    pub actor: AuthenticatedUser,
}

#[derive(Debug, Clone)]
pub struct ResendInviteResult {
    pub invite: Invite,
}

/// Re-sends a pending invite. Owner or Admin only.
///
/// Unlike creation, a delivery failure fails the request: resending has no
/// other effect worth keeping.
pub struct ResendInviteHandler {
    vaults: Arc<dyn VaultReader>,
    memberships: Arc<dyn MembershipReader>,
    invites: Arc<dyn InviteRepository>,
    notifier: Arc<dyn InviteNotifier>,
    settings: InviteSettings,
}

impl ResendInviteHandler {
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

    pub async fn handle(&self, cmd: ResendInviteCommand) -> Result<ResendInviteResult, VaultError> {
        require_role(
            self.memberships.as_ref(),
            &cmd.vault_id,
            &cmd.actor.id,
            VaultAction::ManageMembers,
            "invites",
        )
        .await?;

        let mut invite = self
            .invites
            .find_by_id(&cmd.vault_id, &cmd.invite_id)
            .await?
            .ok_or(VaultError::InviteNotFound)?;

        let now = Timestamp::now();
        invite.can_resend_after(now, self.settings.resend_cooldown_minutes)?;

        let vault = self
            .vaults
            .get_vault(&cmd.vault_id)
            .await?
            .ok_or(VaultError::VaultNotFound)?;

        let inviter_name = if invite.inviter_id == cmd.actor.id {
            cmd.actor.display_name_or_email().to_string()
        } else {
            FALLBACK_INVITER_NAME.to_string()
        };

        let email = InviteEmail {
            vault_name: vault.name,
            inviter_name,
            invitee_email: invite.invitee_email.clone(),
            invite_url: invite.url(&self.settings.app_url),
            expiry_hours: invite.hours_until_expiry(now),
        };
        if let Err(e) = self.notifier.send_invite(&email).await {
            error!(invite_id = %invite.id, error = %e, "failed to resend invite email");
            return Err(VaultError::notification(e.message));
        }

        invite.mark_sent(now);
        if let Err(e) = self.invites.update(&invite).await {
            warn!(invite_id = %invite.id, error = %e, "failed to record resend time");
        }

        info!(vault_id = %cmd.vault_id, invite_id = %invite.id, "invite resent");
        Ok(ResendInviteResult { invite })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        user, MockInviteNotifier, MockInviteRepository, MockVaultStore,
    };
    use crate::domain::vault::{InviteError, InviteStatus, PlanTier, VaultRole};

    struct Fixture {
        store: Arc<MockVaultStore>,
        invites: Arc<MockInviteRepository>,
        notifier: Arc<MockInviteNotifier>,
        vault_id: VaultId,
    }

    impl Fixture {
        fn new(notifier: MockInviteNotifier) -> Self {
            let store = Arc::new(MockVaultStore::new());
            let vault = store.insert_vault(PlanTier::Small, 3);
            store.grant(&vault.id, "admin-1", VaultRole::Admin);
            store.grant(&vault.id, "admin-2", VaultRole::Admin);
            Self {
                store,
                invites: Arc::new(MockInviteRepository::new()),
                notifier: Arc::new(notifier),
                vault_id: vault.id,
            }
        }

        /// Seeds a pending invite by admin-1, last sent `minutes_ago`.
        fn seed_invite(&self, minutes_ago: i64) -> Invite {
            let sent = Timestamp::now().plus_minutes(-minutes_ago);
            let invite = Invite::issue(
                self.vault_id,
                user("admin-1", "a1@example.com").id,
                "guest@example.com",
                VaultRole::Viewer,
                72,
                sent,
            )
            .unwrap();
            self.invites.insert(invite.clone());
            invite
        }

        fn handler(&self) -> ResendInviteHandler {
            ResendInviteHandler::new(
                self.store.clone(),
                self.store.clone(),
                self.invites.clone(),
                self.notifier.clone(),
                InviteSettings::default(),
            )
        }

        fn command(&self, actor: &str, invite: &Invite) -> ResendInviteCommand {
            ResendInviteCommand {
                vault_id: self.vault_id,
                invite_id: invite.id,
                actor: user(actor, &format!("{}@example.com", actor)),
            }
        }
    }

    #[tokio::test]
    async fn resend_after_cooldown_sends_and_records_time() {
        let fx = Fixture::new(MockInviteNotifier::new());
        let invite = fx.seed_invite(15);

        let result = fx.handler().handle(fx.command("admin-1", &invite)).await.unwrap();

        assert!(result.invite.last_sent_at.is_after(&invite.last_sent_at));
        assert_eq!(fx.invites.all()[0].last_sent_at, result.invite.last_sent_at);
        let sent = fx.notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].inviter_name, "admin-1@example.com");
        assert_eq!(sent[0].expiry_hours, 71);
    }

    #[tokio::test]
    async fn resend_by_other_admin_uses_fallback_inviter_name() {
        let fx = Fixture::new(MockInviteNotifier::new());
        let invite = fx.seed_invite(15);

        fx.handler().handle(fx.command("admin-2", &invite)).await.unwrap();

        assert_eq!(fx.notifier.sent()[0].inviter_name, "A team member");
    }

    #[tokio::test]
    async fn resend_within_cooldown_is_rate_limited() {
        let fx = Fixture::new(MockInviteNotifier::new());
        let invite = fx.seed_invite(4);

        let err = fx.handler().handle(fx.command("admin-1", &invite)).await.unwrap_err();

        assert!(matches!(
            err,
            VaultError::Invite(InviteError::ResendTooSoon { wait_minutes: 6 })
        ));
        assert!(fx.notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_fails_resend() {
        let fx = Fixture::new(MockInviteNotifier::failing());
        let invite = fx.seed_invite(30);

        let err = fx.handler().handle(fx.command("admin-1", &invite)).await.unwrap_err();

        assert_eq!(err.message(), "Failed to send email");
        assert_eq!(fx.invites.all()[0].last_sent_at, invite.last_sent_at);
    }

    #[tokio::test]
    async fn accepted_invite_cannot_be_resent() {
        let fx = Fixture::new(MockInviteNotifier::new());
        let mut invite = fx.seed_invite(30);
        invite.status = InviteStatus::Accepted;
        fx.invites.update(&invite).await.unwrap();

        let err = fx.handler().handle(fx.command("admin-1", &invite)).await.unwrap_err();

        assert_eq!(err.message(), "Cannot resend accepted invite");
    }

    #[tokio::test]
    async fn unknown_invite_is_not_found() {
        let fx = Fixture::new(MockInviteNotifier::new());
        let invite = fx.seed_invite(30);
        let mut cmd = fx.command("admin-1", &invite);
        cmd.invite_id = InviteId::new();

        let err = fx.handler().handle(cmd).await.unwrap_err();

        assert_eq!(err, VaultError::InviteNotFound);
    }
}
