//! Vault aggregate entity.
//!
//! A vault is the tenant workspace whose membership is gated by its plan.
//!
//! # Design Decisions
//!
//! - **Denormalized limit**: `seats_limit` is stored next to `plan_tier` so the
//!   database can enforce `members_count <= seats_limit` without knowing the
//!   catalog. It is only ever written from a guard's returned capacity.
//! - **Count owned elsewhere**: `members_count` is maintained by the membership
//!   store; the aggregate reads it but never increments it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError, VaultId};

use super::{
    assert_can_add_member, assert_plan_change_allowed, seats_for_plan, PlanTier, SeatGuardError,
    SeatUsage,
};

/// Vault aggregate.
///
/// # Invariants
///
/// - `seats_limit == seats_for_plan(plan_tier)`
/// - `members_count <= seats_limit` immediately after a gated transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub id: VaultId,
    pub name: String,
    pub plan_tier: PlanTier,
    pub members_count: u32,
    pub seats_limit: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Vault {
    /// Creates an empty vault on the default tier.
    pub fn create(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }

        let now = Timestamp::now();
        let plan_tier = PlanTier::default();
        Ok(Self {
            id: VaultId::new(),
            name,
            plan_tier,
            members_count: 0,
            seats_limit: seats_for_plan(plan_tier),
            created_at: now,
            updated_at: now,
        })
    }

    /// Moves the vault to `new_tier` if its current members fit.
    ///
    /// # Errors
    ///
    /// `PlanChangeExceedsSeats` when `members_count` exceeds the new capacity.
    /// The vault is left untouched.
    pub fn change_plan(&mut self, new_tier: PlanTier) -> Result<(), SeatGuardError> {
        let limit = assert_plan_change_allowed(self.members_count, new_tier)?;
        self.plan_tier = new_tier;
        self.seats_limit = limit;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Checks that one more member fits on the current plan.
    pub fn ensure_seat_available(&self) -> Result<(), SeatGuardError> {
        assert_can_add_member(self.members_count, self.plan_tier)
    }

    pub fn seat_usage(&self) -> SeatUsage {
        SeatUsage::compute(self.members_count, self.plan_tier)
    }
}
