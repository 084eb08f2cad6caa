//! Membership reader port (read side).
//!
//! Answers "which role does this user hold in this vault". Role checks run
//! before any governance operation and are the only thing the HTTP layer
//! needs from membership storage on the read path.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, VaultId};
use crate::domain::vault::VaultRole;

/// Reader port for vault membership queries.
#[async_trait]
pub trait MembershipReader: Send + Sync {
    /// Role `user_id` holds in `vault_id`.
    ///
    /// Returns `None` if the user is not a member.
    async fn role_of(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
    ) -> Result<Option<VaultRole>, DomainError>;

    /// Whether `user_id` is a member of `vault_id` with any role.
    async fn is_member(&self, vault_id: &VaultId, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.role_of(vault_id, user_id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedRoles(HashMap<String, VaultRole>);

    #[async_trait]
    impl MembershipReader for FixedRoles {
        async fn role_of(
            &self,
            _vault_id: &VaultId,
            user_id: &UserId,
        ) -> Result<Option<VaultRole>, DomainError> {
            Ok(self.0.get(user_id.as_str()).copied())
        }
    }

    #[tokio::test]
    async fn is_member_follows_role_lookup() {
        let reader = FixedRoles(HashMap::from([("alice".to_string(), VaultRole::Viewer)]));
        let vault_id = VaultId::new();

        assert!(reader
            .is_member(&vault_id, &UserId::new("alice").unwrap())
            .await
            .unwrap());
        assert!(!reader
            .is_member(&vault_id, &UserId::new("bob").unwrap())
            .await
            .unwrap());
    }
}
