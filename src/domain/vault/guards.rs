//! Change guards.
//!
//! Gate the two transitions that can grow membership beyond capacity:
//! switching plans and adding a member. Both are pure checks. Callers that
//! act on a successful result must re-check atomically at the store, since
//! the member count can move between check and write.

use thiserror::Error;

use super::{seats_for_plan, PlanTier};

/// A seat-capacity violation. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatGuardError {
    #[error("Cannot downgrade: {current_members} members > {limit} seat limit.")]
    PlanChangeExceedsSeats {
        current_members: u32,
        limit: u32,
        requested_tier: PlanTier,
    },

    #[error("Seat limit reached. Upgrade plan or remove members. Current: {current_members}/{limit}")]
    SeatLimitReached { current_members: u32, limit: u32 },
}

impl SeatGuardError {
    /// The exact message shown to the user.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn current_members(&self) -> u32 {
        match self {
            SeatGuardError::PlanChangeExceedsSeats {
                current_members, ..
            }
            | SeatGuardError::SeatLimitReached {
                current_members, ..
            } => *current_members,
        }
    }

    pub fn limit(&self) -> u32 {
        match self {
            SeatGuardError::PlanChangeExceedsSeats { limit, .. }
            | SeatGuardError::SeatLimitReached { limit, .. } => *limit,
        }
    }
}

/// Checks that a vault with `current_members` fits on `new_tier`.
///
/// Returns the new seat capacity so the caller can persist it alongside the
/// tier. Moving to a higher or equal tier always passes; no tier ordering is
/// consulted.
pub fn assert_plan_change_allowed(
    current_members: u32,
    new_tier: PlanTier,
) -> Result<u32, SeatGuardError> {
    let limit = seats_for_plan(new_tier);
    if current_members > limit {
        return Err(SeatGuardError::PlanChangeExceedsSeats {
            current_members,
            limit,
            requested_tier: new_tier,
        });
    }
    Ok(limit)
}

/// Checks that one more member fits on `tier`.
pub fn assert_can_add_member(current_members: u32, tier: PlanTier) -> Result<(), SeatGuardError> {
    let limit = seats_for_plan(tier);
    if current_members >= limit {
        return Err(SeatGuardError::SeatLimitReached {
            current_members,
            limit,
        });
    }
    Ok(())
}
