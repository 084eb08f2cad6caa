//! Hand-written port mocks shared by handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{
    AuthenticatedUser, DomainError, ErrorCode, InviteId, UserId, VaultId,
};
use crate::domain::vault::{
    assert_can_add_member, assert_plan_change_allowed, seats_for_plan, Invite, InviteToken,
    PlanTier, Vault, VaultRole,
};
use crate::ports::{
    InviteEmail, InviteNotifier, InviteRepository, MembershipReader, MembershipRepository,
    PlanUpdate, SeatClaim, VaultReader, VaultRepository,
};

// ════════════════════════════════════════════════════════════════════════════
// Vault + membership store
// ════════════════════════════════════════════════════════════════════════════

/// Mutex-backed vault and membership store.
///
/// `members_count` is tracked independently of the role map so tests can
/// seed a vault with N anonymous members and grant roles to a few named ones.
pub struct MockVaultStore {
    vaults: Mutex<HashMap<VaultId, Vault>>,
    roles: Mutex<HashMap<(VaultId, String), VaultRole>>,
    fail_writes: bool,
    /// Members added behind the caller's back right before the next write.
    concurrent_joins: Mutex<u32>,
}

impl MockVaultStore {
    pub fn new() -> Self {
        Self {
            vaults: Mutex::new(HashMap::new()),
            roles: Mutex::new(HashMap::new()),
            fail_writes: false,
            concurrent_joins: Mutex::new(0),
        }
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::new()
        }
    }

    pub fn insert_vault(&self, tier: PlanTier, members_count: u32) -> Vault {
        let mut vault = Vault::create("Acme Holdings").unwrap();
        vault.plan_tier = tier;
        vault.seats_limit = seats_for_plan(tier);
        vault.members_count = members_count;
        self.vaults.lock().unwrap().insert(vault.id, vault.clone());
        vault
    }

    pub fn grant(&self, vault_id: &VaultId, user: &str, role: VaultRole) {
        self.roles
            .lock()
            .unwrap()
            .insert((*vault_id, user.to_string()), role);
    }

    /// Simulates other requests adding `n` members between read and write.
    pub fn join_concurrently_before_next_write(&self, n: u32) {
        *self.concurrent_joins.lock().unwrap() = n;
    }

    pub fn vault(&self, vault_id: &VaultId) -> Vault {
        self.vaults.lock().unwrap()[vault_id].clone()
    }

    pub fn role(&self, vault_id: &VaultId, user: &str) -> Option<VaultRole> {
        self.roles
            .lock()
            .unwrap()
            .get(&(*vault_id, user.to_string()))
            .copied()
    }

    fn apply_concurrent_joins(&self, vault: &mut Vault) {
        let mut pending = self.concurrent_joins.lock().unwrap();
        vault.members_count += *pending;
        *pending = 0;
    }

    fn write_guard(&self) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::database("Simulated write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl VaultReader for MockVaultStore {
    async fn get_vault(&self, vault_id: &VaultId) -> Result<Option<Vault>, DomainError> {
        Ok(self.vaults.lock().unwrap().get(vault_id).cloned())
    }
}

#[async_trait]
impl VaultRepository for MockVaultStore {
    async fn create(&self, vault: &Vault, owner: &UserId) -> Result<(), DomainError> {
        self.write_guard()?;
        let mut stored = vault.clone();
        stored.members_count = 1;
        self.vaults.lock().unwrap().insert(vault.id, stored);
        self.grant(&vault.id, owner.as_str(), VaultRole::Owner);
        Ok(())
    }

    async fn update_plan(
        &self,
        vault_id: &VaultId,
        new_tier: PlanTier,
        seats_limit: u32,
    ) -> Result<PlanUpdate, DomainError> {
        self.write_guard()?;
        let mut vaults = self.vaults.lock().unwrap();
        let vault = vaults
            .get_mut(vault_id)
            .ok_or_else(|| DomainError::new(ErrorCode::VaultNotFound, "Vault not found"))?;
        self.apply_concurrent_joins(vault);

        if vault.members_count > seats_limit {
            return Ok(PlanUpdate::Rejected(
                assert_plan_change_allowed(vault.members_count, new_tier).unwrap_err(),
            ));
        }
        vault.plan_tier = new_tier;
        vault.seats_limit = seats_limit;
        Ok(PlanUpdate::Applied(vault.clone()))
    }
}

#[async_trait]
impl MembershipReader for MockVaultStore {
    async fn role_of(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
    ) -> Result<Option<VaultRole>, DomainError> {
        Ok(self.role(vault_id, user_id.as_str()))
    }
}

#[async_trait]
impl MembershipRepository for MockVaultStore {
    async fn add_member_within_limit(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
        role: VaultRole,
    ) -> Result<SeatClaim, DomainError> {
        self.write_guard()?;
        if self.role(vault_id, user_id.as_str()).is_some() {
            return Ok(SeatClaim::AlreadyMember);
        }

        let mut vaults = self.vaults.lock().unwrap();
        let vault = vaults
            .get_mut(vault_id)
            .ok_or_else(|| DomainError::new(ErrorCode::VaultNotFound, "Vault not found"))?;
        self.apply_concurrent_joins(vault);

        if let Err(e) = assert_can_add_member(vault.members_count, vault.plan_tier) {
            return Ok(SeatClaim::Rejected(e));
        }
        vault.members_count += 1;
        let members_count = vault.members_count;
        drop(vaults);

        self.grant(vault_id, user_id.as_str(), role);
        Ok(SeatClaim::Added { members_count })
    }

    async fn remove_member(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        self.write_guard()?;
        let removed = self
            .roles
            .lock()
            .unwrap()
            .remove(&(*vault_id, user_id.as_str().to_string()))
            .is_some();
        if removed {
            if let Some(vault) = self.vaults.lock().unwrap().get_mut(vault_id) {
                vault.members_count = vault.members_count.saturating_sub(1);
            }
        }
        Ok(removed)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Invites
// ════════════════════════════════════════════════════════════════════════════

pub struct MockInviteRepository {
    invites: Mutex<Vec<Invite>>,
    fail_save: bool,
    fail_update: bool,
}

impl MockInviteRepository {
    pub fn new() -> Self {
        Self {
            invites: Mutex::new(Vec::new()),
            fail_save: false,
            fail_update: false,
        }
    }

    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::new()
        }
    }

    pub fn failing_update() -> Self {
        Self {
            fail_update: true,
            ..Self::new()
        }
    }

    pub fn insert(&self, invite: Invite) {
        self.invites.lock().unwrap().push(invite);
    }

    pub fn all(&self) -> Vec<Invite> {
        self.invites.lock().unwrap().clone()
    }
}

#[async_trait]
impl InviteRepository for MockInviteRepository {
    async fn save(&self, invite: &Invite) -> Result<(), DomainError> {
        if self.fail_save {
            return Err(DomainError::database("Simulated save failure"));
        }
        self.invites.lock().unwrap().push(invite.clone());
        Ok(())
    }

    async fn update(&self, invite: &Invite) -> Result<(), DomainError> {
        if self.fail_update {
            return Err(DomainError::database("Simulated update failure"));
        }
        let mut invites = self.invites.lock().unwrap();
        match invites.iter_mut().find(|i| i.id == invite.id) {
            Some(stored) => {
                *stored = invite.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::InviteNotFound, "Invite not found")),
        }
    }

    async fn find_by_id(
        &self,
        vault_id: &VaultId,
        invite_id: &InviteId,
    ) -> Result<Option<Invite>, DomainError> {
        let invites = self.invites.lock().unwrap();
        Ok(invites
            .iter()
            .find(|i| &i.id == invite_id && &i.vault_id == vault_id)
            .cloned())
    }

    async fn find_by_token(&self, token: &InviteToken) -> Result<Option<Invite>, DomainError> {
        let invites = self.invites.lock().unwrap();
        Ok(invites.iter().find(|i| &i.token == token).cloned())
    }

    async fn list_for_vault(&self, vault_id: &VaultId) -> Result<Vec<Invite>, DomainError> {
        let mut invites: Vec<Invite> = self
            .invites
            .lock()
            .unwrap()
            .iter()
            .filter(|i| &i.vault_id == vault_id)
            .cloned()
            .collect();
        invites.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(invites)
    }
}

pub struct MockInviteNotifier {
    sent: Mutex<Vec<InviteEmail>>,
    fail: bool,
}

impl MockInviteNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<InviteEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl InviteNotifier for MockInviteNotifier {
    async fn send_invite(&self, email: &InviteEmail) -> Result<(), DomainError> {
        if self.fail {
            return Err(DomainError::new(
                ErrorCode::NotificationError,
                "Simulated delivery failure",
            ));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════

pub fn user(id: &str, email: &str) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(id).unwrap(), email, None, true)
}

pub fn user_id(id: &str) -> UserId {
    UserId::new(id).unwrap()
}
