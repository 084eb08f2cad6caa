//! In-memory invite repository.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, InviteId, VaultId};
use crate::domain::vault::{Invite, InviteToken};
use crate::ports::InviteRepository;

/// Process-local invite storage keyed by invite id.
#[derive(Debug, Default)]
pub struct InMemoryInviteRepository {
    invites: RwLock<HashMap<InviteId, Invite>>,
}

impl InMemoryInviteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InviteRepository for InMemoryInviteRepository {
    async fn save(&self, invite: &Invite) -> Result<(), DomainError> {
        let mut invites = self.invites.write().await;
        if invites.values().any(|i| i.token == invite.token) {
            return Err(DomainError::new(ErrorCode::Conflict, "Invite token already exists"));
        }
        invites.insert(invite.id, invite.clone());
        Ok(())
    }

    async fn update(&self, invite: &Invite) -> Result<(), DomainError> {
        let mut invites = self.invites.write().await;
        match invites.get_mut(&invite.id) {
            Some(stored) => {
                *stored = invite.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::InviteNotFound, "Invite not found")
                .with_detail("invite_id", invite.id.to_string())),
        }
    }

    async fn find_by_id(
        &self,
        vault_id: &VaultId,
        invite_id: &InviteId,
    ) -> Result<Option<Invite>, DomainError> {
        Ok(self
            .invites
            .read()
            .await
            .get(invite_id)
            .filter(|i| i.vault_id == *vault_id)
            .cloned())
    }

    async fn find_by_token(&self, token: &InviteToken) -> Result<Option<Invite>, DomainError> {
        Ok(self
            .invites
            .read()
            .await
            .values()
            .find(|i| i.token == *token)
            .cloned())
    }

    async fn list_for_vault(&self, vault_id: &VaultId) -> Result<Vec<Invite>, DomainError> {
        let mut invites: Vec<Invite> = self
            .invites
            .read()
            .await
            .values()
            .filter(|i| i.vault_id == *vault_id)
            .cloned()
            .collect();
        invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use crate::domain::vault::{InviteStatus, VaultRole};

    fn invite(vault_id: VaultId, email: &str, created: Timestamp) -> Invite {
        Invite::issue(
            vault_id,
            UserId::new("admin-1").unwrap(),
            email,
            VaultRole::Viewer,
            72,
            created,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn saved_invite_is_found_by_id_and_token() {
        let repo = InMemoryInviteRepository::new();
        let vault_id = VaultId::new();
        let inv = invite(vault_id, "guest@example.com", Timestamp::now());
        repo.save(&inv).await.unwrap();

        assert_eq!(repo.find_by_id(&vault_id, &inv.id).await.unwrap(), Some(inv.clone()));
        assert_eq!(repo.find_by_token(&inv.token).await.unwrap(), Some(inv));
    }

    #[tokio::test]
    async fn find_by_id_is_scoped_to_vault() {
        let repo = InMemoryInviteRepository::new();
        let inv = invite(VaultId::new(), "guest@example.com", Timestamp::now());
        repo.save(&inv).await.unwrap();

        assert_eq!(repo.find_by_id(&VaultId::new(), &inv.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn update_replaces_stored_invite() {
        let repo = InMemoryInviteRepository::new();
        let mut inv = invite(VaultId::new(), "guest@example.com", Timestamp::now());
        repo.save(&inv).await.unwrap();

        inv.accept(Timestamp::now()).unwrap();
        repo.update(&inv).await.unwrap();

        let stored = repo.find_by_token(&inv.token).await.unwrap().unwrap();
        assert_eq!(stored.status, InviteStatus::Accepted);
    }

    #[tokio::test]
    async fn update_of_unknown_invite_fails() {
        let repo = InMemoryInviteRepository::new();
        let inv = invite(VaultId::new(), "guest@example.com", Timestamp::now());

        let err = repo.update(&inv).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InviteNotFound);
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = InMemoryInviteRepository::new();
        let vault_id = VaultId::new();
        let now = Timestamp::now();
        repo.save(&invite(vault_id, "old@example.com", now.plus_hours(-2))).await.unwrap();
        repo.save(&invite(vault_id, "new@example.com", now)).await.unwrap();
        repo.save(&invite(vault_id, "mid@example.com", now.plus_hours(-1))).await.unwrap();

        let emails: Vec<String> = repo
            .list_for_vault(&vault_id)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.invitee_email)
            .collect();

        assert_eq!(emails, vec!["new@example.com", "mid@example.com", "old@example.com"]);
    }
}
