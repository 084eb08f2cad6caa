//! ListInvitesHandler - Query handler for a vault's invites.

use std::sync::Arc;

use crate::application::handlers::access::require_role;
use crate::domain::foundation::{UserId, VaultId};
use crate::domain::vault::{Invite, VaultAction, VaultError};
use crate::ports::{InviteRepository, MembershipReader};

#[derive(Debug, Clone)]
pub struct ListInvitesQuery {
    pub vault_id: VaultId,
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ListInvitesResult {
    /// Newest first.
    pub invites: Vec<Invite>,
}

/// Lists every invite of a vault, in any status. Owner or Admin only.
pub struct ListInvitesHandler {
    memberships: Arc<dyn MembershipReader>,
    invites: Arc<dyn InviteRepository>,
}

impl ListInvitesHandler {
    pub fn new(memberships: Arc<dyn MembershipReader>, invites: Arc<dyn InviteRepository>) -> Self {
        Self {
            memberships,
            invites,
        }
    }

    pub async fn handle(&self, query: ListInvitesQuery) -> Result<ListInvitesResult, VaultError> {
        require_role(
            self.memberships.as_ref(),
            &query.vault_id,
            &query.user_id,
            VaultAction::ManageMembers,
            "invites",
        )
        .await?;

        let invites = self.invites.list_for_vault(&query.vault_id).await?;
        Ok(ListInvitesResult { invites })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{user_id, MockInviteRepository, MockVaultStore};
    use crate::domain::foundation::Timestamp;
    use crate::domain::vault::{PlanTier, VaultRole};

    fn invite_at(vault_id: VaultId, email: &str, created: Timestamp) -> Invite {
        Invite::issue(vault_id, user_id("admin-1"), email, VaultRole::Viewer, 72, created).unwrap()
    }

    #[tokio::test]
    async fn admin_lists_invites_newest_first() {
        let store = Arc::new(MockVaultStore::new());
        let vault = store.insert_vault(PlanTier::Medium, 4);
        store.grant(&vault.id, "admin-1", VaultRole::Admin);

        let invites = Arc::new(MockInviteRepository::new());
        let now = Timestamp::now();
        invites.insert(invite_at(vault.id, "first@example.com", now.plus_minutes(-30)));
        invites.insert(invite_at(vault.id, "second@example.com", now));
        invites.insert(invite_at(VaultId::new(), "elsewhere@example.com", now));

        let result = ListInvitesHandler::new(store, invites)
            .handle(ListInvitesQuery {
                vault_id: vault.id,
                user_id: user_id("admin-1"),
            })
            .await
            .unwrap();

        let emails: Vec<&str> = result.invites.iter().map(|i| i.invitee_email.as_str()).collect();
        assert_eq!(emails, vec!["second@example.com", "first@example.com"]);
    }

    #[tokio::test]
    async fn editor_cannot_list_invites() {
        let store = Arc::new(MockVaultStore::new());
        let vault = store.insert_vault(PlanTier::Medium, 4);
        store.grant(&vault.id, "editor-1", VaultRole::Editor);

        let result = ListInvitesHandler::new(store, Arc::new(MockInviteRepository::new()))
            .handle(ListInvitesQuery {
                vault_id: vault.id,
                user_id: user_id("editor-1"),
            })
            .await;

        assert!(matches!(result, Err(VaultError::Forbidden(_))));
    }
}
