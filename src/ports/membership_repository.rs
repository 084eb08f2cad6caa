//! Membership repository port (write side).
//!
//! Owns `members_count`. Every addition is conditional on a free seat at
//! write time, so concurrent accepts cannot overfill a vault.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId, VaultId};
use crate::domain::vault::{SeatGuardError, VaultRole};

/// Outcome of a conditional member insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatClaim {
    /// Member inserted. Carries the vault's new member count.
    Added { members_count: u32 },

    /// The user already belonged to the vault; nothing changed.
    AlreadyMember,

    /// No seat was free at write time.
    Rejected(SeatGuardError),
}

/// Repository port for vault membership writes.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Insert a membership and increment the vault's member count in one
    /// atomic step, only if `members_count < seats_limit`.
    ///
    /// # Errors
    ///
    /// - `VaultNotFound` if the vault doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn add_member_within_limit(
        &self,
        vault_id: &VaultId,
        user_id: &UserId,
        role: VaultRole,
    ) -> Result<SeatClaim, DomainError>;

    /// Remove a membership and decrement the member count.
    ///
    /// Returns `false` if the user was not a member.
    async fn remove_member(&self, vault_id: &VaultId, user_id: &UserId)
        -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_repository_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn MembershipRepository>();
    }

    #[test]
    fn rejected_claim_carries_guard_error() {
        let claim = SeatClaim::Rejected(SeatGuardError::SeatLimitReached {
            current_members: 10,
            limit: 10,
        });
        assert!(matches!(claim, SeatClaim::Rejected(e) if e.limit() == 10));
    }
}
