//! In-memory vault and membership store.
//!
//! Vaults and their role maps live behind a single lock, so a seat claim or
//! plan change reads the member count and writes the new state atomically.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, VaultId};
use crate::domain::vault::{assert_can_add_member, PlanTier, SeatGuardError, Vault, VaultRole};
use crate::ports::{
    MembershipReader, MembershipRepository, PlanUpdate, SeatClaim, VaultReader, VaultRepository,
};

#[derive(Debug, Clone)]
struct VaultEntry {
    vault: Vault,
    members: HashMap<UserId, VaultRole>,
}

impl VaultEntry {
    fn sync_count(&mut self) {
        self.vault.members_count = self.members.len() as u32;
    }
}

/// Process-local store for vaults and memberships.
///
/// Backs local development and integration tests when no database is
/// configured. State is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryVaultStore {
    entries: RwLock<HashMap<VaultId, VaultEntry>>,
}

impl InMemoryVaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored vaults.
    pub async fn vault_count(&self) -> usize {
        self.entries.read().await.len()
    }
}

fn vault_not_found(vault_id: &VaultId) -> DomainError {
    DomainError::new(ErrorCode::VaultNotFound, "Vault not found")
        .with_detail("vault_id", vault_id.to_string())
}

#[async_trait]
impl VaultReader for InMemoryVaultStore {
    async fn get_vault(&self, vault_id: &VaultId) -> Result<Option<Vault>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .get(vault_id)
            .map(|entry| entry.vault.clone()))
    }
}

#[async_trait]
impl VaultRepository for InMemoryVaultStore {
    async fn create(&self, vault: &Vault, owner: &UserId) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&vault.id) {
            return Err(DomainError::new(ErrorCode::Conflict, "Vault already exists"));
        }

        let mut entry = VaultEntry {
            vault: vault.clone(),
            members: HashMap::from([(owner.clone(), VaultRole::Owner)]),
        };
        entry.sync_count();
        entries.insert(vault.id, entry);
        Ok(())
    }

    async fn update_plan(
        &self,
        vault_id: &VaultId,
        new_tier: PlanTier,
        seats_limit: u32,
    ) -> Result<PlanUpdate, DomainError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(vault_id)
            .ok_or_else(|| vault_not_found(vault_id))?;

        if entry.vault.members_count > seats_limit {
            return Ok(PlanUpdate::Rejected(SeatGuardError::PlanChangeExceedsSeats {
                current_members: entry.vault.members_count,
                limit: seats_limit,
                requested_tier: new_tier,
            }));
        }

        entry.vault.plan_tier = new_tier;
        entry.vault.seats_limit = seats_limit;
        entry.vault.updated_at = Timestamp::now();
        Ok(PlanUpdate::Applied(entry.vault.clone()))
    }
}

#[async_trait]
impl MembershipReader for InMemoryVaultStore {
    async fn role_of(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
    ) -> Result<Option<VaultRole>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .get(vault_id)
            .and_then(|entry| entry.members.get(user_id).copied()))
    }
}

#[async_trait]
impl MembershipRepository for InMemoryVaultStore {
    async fn add_member_within_limit(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
        role: VaultRole,
    ) -> Result<SeatClaim, DomainError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(vault_id)
            .ok_or_else(|| vault_not_found(vault_id))?;

        if entry.members.contains_key(user_id) {
            return Ok(SeatClaim::AlreadyMember);
        }
        if let Err(e) = assert_can_add_member(entry.vault.members_count, entry.vault.plan_tier) {
            return Ok(SeatClaim::Rejected(e));
        }

        entry.members.insert(user_id.clone(), role);
        entry.sync_count();
        entry.vault.updated_at = Timestamp::now();
        Ok(SeatClaim::Added {
            members_count: entry.vault.members_count,
        })
    }

    async fn remove_member(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(vault_id)
            .ok_or_else(|| vault_not_found(vault_id))?;

        let removed = entry.members.remove(user_id).is_some();
        if removed {
            entry.sync_count();
            entry.vault.updated_at = Timestamp::now();
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn uid(s: &str) -> UserId {
        UserId::new(s).unwrap()
    }

    async fn store_with_vault() -> (InMemoryVaultStore, Vault) {
        let store = InMemoryVaultStore::new();
        let vault = Vault::create("Acme Holdings").unwrap();
        store.create(&vault, &uid("owner-1")).await.unwrap();
        (store, vault)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Creation
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_registers_owner_as_first_member() {
        let (store, vault) = store_with_vault().await;

        let stored = store.get_vault(&vault.id).await.unwrap().unwrap();

        assert_eq!(stored.members_count, 1);
        assert_eq!(stored.seats_limit, 10);
        assert_eq!(
            store.role_of(&vault.id, &uid("owner-1")).await.unwrap(),
            Some(VaultRole::Owner)
        );
    }

    #[tokio::test]
    async fn duplicate_create_conflicts() {
        let (store, vault) = store_with_vault().await;

        let err = store.create(&vault, &uid("owner-2")).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Seat Claims
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn members_fill_small_plan_up_to_ten() {
        let (store, vault) = store_with_vault().await;

        for i in 2..=10 {
            let claim = store
                .add_member_within_limit(&vault.id, &uid(&format!("m-{}", i)), VaultRole::Viewer)
                .await
                .unwrap();
            assert_eq!(claim, SeatClaim::Added { members_count: i });
        }

        let claim = store
            .add_member_within_limit(&vault.id, &uid("m-11"), VaultRole::Viewer)
            .await
            .unwrap();
        assert_eq!(
            claim,
            SeatClaim::Rejected(SeatGuardError::SeatLimitReached {
                current_members: 10,
                limit: 10,
            })
        );
    }

    #[tokio::test]
    async fn existing_member_is_not_counted_twice() {
        let (store, vault) = store_with_vault().await;

        let claim = store
            .add_member_within_limit(&vault.id, &uid("owner-1"), VaultRole::Viewer)
            .await
            .unwrap();

        assert_eq!(claim, SeatClaim::AlreadyMember);
        assert_eq!(store.get_vault(&vault.id).await.unwrap().unwrap().members_count, 1);
    }

    #[tokio::test]
    async fn concurrent_claims_never_exceed_limit() {
        let (store, vault) = store_with_vault().await;
        let store = Arc::new(store);

        let mut tasks = Vec::new();
        for i in 0..30 {
            let store = store.clone();
            let vault_id = vault.id;
            tasks.push(tokio::spawn(async move {
                store
                    .add_member_within_limit(&vault_id, &uid(&format!("c-{}", i)), VaultRole::Viewer)
                    .await
                    .unwrap()
            }));
        }

        let mut added = 0;
        for task in tasks {
            if matches!(task.await.unwrap(), SeatClaim::Added { .. }) {
                added += 1;
            }
        }

        assert_eq!(added, 9);
        assert_eq!(store.get_vault(&vault.id).await.unwrap().unwrap().members_count, 10);
    }

    #[tokio::test]
    async fn claim_on_unknown_vault_is_not_found() {
        let store = InMemoryVaultStore::new();

        let err = store
            .add_member_within_limit(&VaultId::new(), &uid("a"), VaultRole::Viewer)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::VaultNotFound);
    }

    #[tokio::test]
    async fn remove_member_frees_a_seat() {
        let (store, vault) = store_with_vault().await;
        store
            .add_member_within_limit(&vault.id, &uid("m-2"), VaultRole::Editor)
            .await
            .unwrap();

        assert!(store.remove_member(&vault.id, &uid("m-2")).await.unwrap());
        assert!(!store.remove_member(&vault.id, &uid("m-2")).await.unwrap());
        assert_eq!(store.get_vault(&vault.id).await.unwrap().unwrap().members_count, 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Plan Updates
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn upgrade_applies_new_limit() {
        let (store, vault) = store_with_vault().await;

        let update = store
            .update_plan(&vault.id, PlanTier::Enterprise, 75)
            .await
            .unwrap();

        match update {
            PlanUpdate::Applied(v) => {
                assert_eq!(v.plan_tier, PlanTier::Enterprise);
                assert_eq!(v.seats_limit, 75);
            }
            other => panic!("expected applied, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn downgrade_below_members_is_rejected() {
        let (store, vault) = store_with_vault().await;
        store.update_plan(&vault.id, PlanTier::Medium, 25).await.unwrap();
        for i in 0..11 {
            store
                .add_member_within_limit(&vault.id, &uid(&format!("m-{}", i)), VaultRole::Viewer)
                .await
                .unwrap();
        }

        let update = store.update_plan(&vault.id, PlanTier::Small, 10).await.unwrap();

        assert_eq!(
            update,
            PlanUpdate::Rejected(SeatGuardError::PlanChangeExceedsSeats {
                current_members: 12,
                limit: 10,
                requested_tier: PlanTier::Small,
            })
        );
        let stored = store.get_vault(&vault.id).await.unwrap().unwrap();
        assert_eq!(stored.plan_tier, PlanTier::Medium);
    }
}
