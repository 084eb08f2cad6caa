//! Role checks shared by vault handlers.

use crate::domain::foundation::{UserId, VaultId};
use crate::domain::vault::{permission_denied_message, VaultAction, VaultError, VaultRole};
use crate::ports::MembershipReader;

/// Ensures `user_id` holds a role in `vault_id` that permits `action`.
///
/// Non-members are treated as holding no role. On refusal the error carries
/// the full permission message naming the roles that would have sufficed.
pub async fn require_role(
    memberships: &dyn MembershipReader,
    vault_id: &VaultId,
    user_id: &UserId,
    action: VaultAction,
    resource: &str,
) -> Result<VaultRole, VaultError> {
    let role = memberships.role_of(vault_id, user_id).await?;
    match role {
        Some(role) if role.permits(action) => Ok(role),
        _ => {
            tracing::debug!(
                vault_id = %vault_id,
                user_id = %user_id,
                role = ?role,
                "permission denied"
            );
            Err(VaultError::forbidden(permission_denied_message(
                action, resource, role,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockVaultStore;
    use crate::domain::vault::PlanTier;

    #[tokio::test]
    async fn admin_may_manage_members() {
        let store = MockVaultStore::new();
        let vault = store.insert_vault(PlanTier::Small, 2);
        store.grant(&vault.id, "admin-1", VaultRole::Admin);

        let role = require_role(
            &store,
            &vault.id,
            &UserId::new("admin-1").unwrap(),
            VaultAction::ManageMembers,
            "members",
        )
        .await
        .unwrap();

        assert_eq!(role, VaultRole::Admin);
    }

    #[tokio::test]
    async fn editor_refused_with_permission_message() {
        let store = MockVaultStore::new();
        let vault = store.insert_vault(PlanTier::Small, 2);
        store.grant(&vault.id, "editor-1", VaultRole::Editor);

        let err = require_role(
            &store,
            &vault.id,
            &UserId::new("editor-1").unwrap(),
            VaultAction::ManageSettings,
            "plan settings",
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.message(),
            "Permission denied: You need OWNER, ADMIN role to manage plan settings. \
             Your current role is: EDITOR. Please contact an Admin or Owner to request \
             the necessary permissions."
        );
    }

    #[tokio::test]
    async fn non_member_refused_even_for_view() {
        let store = MockVaultStore::new();
        let vault = store.insert_vault(PlanTier::Small, 2);

        let err = require_role(
            &store,
            &vault.id,
            &UserId::new("stranger").unwrap(),
            VaultAction::View,
            "vault plan",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, VaultError::Forbidden(msg) if msg.contains("Your current role is: None.")));
    }
}
