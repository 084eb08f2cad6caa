//! Capacity calculator.
//!
//! Pure functions over a member count and a tier. A vault that is already
//! over capacity (possible after out-of-band edits) reports zero remaining
//! seats rather than an error.

use serde::Serialize;

use super::{seats_for_plan, PlanTier};

/// Returns true when the vault is at or over capacity.
pub fn will_exceed_seats(member_count: u32, tier: PlanTier) -> bool {
    member_count >= seats_for_plan(tier)
}

/// Seats still available on `tier`. Never underflows.
pub fn seats_remaining(member_count: u32, tier: PlanTier) -> u32 {
    seats_for_plan(tier).saturating_sub(member_count)
}

/// Snapshot of a vault's seat consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatUsage {
    pub plan_tier: PlanTier,
    pub seats_limit: u32,
    pub members_count: u32,
    pub seats_remaining: u32,
    pub can_invite: bool,
}

impl SeatUsage {
    pub fn compute(members_count: u32, tier: PlanTier) -> Self {
        let remaining = seats_remaining(members_count, tier);
        Self {
            plan_tier: tier,
            seats_limit: seats_for_plan(tier),
            members_count,
            seats_remaining: remaining,
            can_invite: remaining > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_tier() -> impl Strategy<Value = PlanTier> {
        prop_oneof![
            Just(PlanTier::Small),
            Just(PlanTier::Medium),
            Just(PlanTier::Enterprise),
        ]
    }

    #[test]
    fn small_vault_with_seven_members_has_three_seats_left() {
        assert_eq!(seats_remaining(7, PlanTier::Small), 3);
        assert!(!will_exceed_seats(7, PlanTier::Small));
    }

    #[test]
    fn full_medium_vault_is_at_capacity() {
        assert!(will_exceed_seats(25, PlanTier::Medium));
        assert_eq!(seats_remaining(25, PlanTier::Medium), 0);
    }

    #[test]
    fn over_capacity_reports_zero_remaining() {
        assert_eq!(seats_remaining(12, PlanTier::Small), 0);
        assert!(will_exceed_seats(12, PlanTier::Small));
    }

    #[test]
    fn fifteen_members_on_small_clamps_to_zero() {
        assert_eq!(seats_remaining(15, PlanTier::Small), 0);
    }

    #[test]
    fn fifty_members_on_enterprise_leave_twenty_five() {
        assert_eq!(seats_remaining(50, PlanTier::Enterprise), 25);
    }

    #[test]
    fn seats_remaining_handles_max_member_count() {
        assert_eq!(seats_remaining(u32::MAX, PlanTier::Enterprise), 0);
    }

    #[test]
    fn seat_usage_reports_can_invite_when_seats_free() {
        let usage = SeatUsage::compute(9, PlanTier::Small);
        assert_eq!(usage.seats_limit, 10);
        assert_eq!(usage.seats_remaining, 1);
        assert!(usage.can_invite);
    }

    #[test]
    fn seat_usage_keeps_raw_count_when_over_capacity() {
        let usage = SeatUsage::compute(30, PlanTier::Medium);
        assert_eq!(usage.members_count, 30);
        assert_eq!(usage.seats_remaining, 0);
        assert!(!usage.can_invite);
    }

    #[test]
    fn seat_usage_serializes_camel_case() {
        let json = serde_json::to_value(SeatUsage::compute(3, PlanTier::Medium)).unwrap();
        assert_eq!(json["planTier"], "Medium");
        assert_eq!(json["seatsLimit"], 25);
        assert_eq!(json["membersCount"], 3);
        assert_eq!(json["seatsRemaining"], 22);
        assert_eq!(json["canInvite"], true);
    }

    proptest! {
        #[test]
        fn empty_vault_has_full_capacity(tier in any_tier()) {
            prop_assert_eq!(seats_remaining(0, tier), seats_for_plan(tier));
        }

        #[test]
        fn full_vault_has_no_seats(tier in any_tier()) {
            let c = seats_for_plan(tier);
            prop_assert_eq!(seats_remaining(c, tier), 0);
            prop_assert!(will_exceed_seats(c, tier));
            prop_assert!(!will_exceed_seats(c - 1, tier));
        }

        #[test]
        fn overfull_vault_never_goes_negative(tier in any_tier(), k in 0u32..100_000) {
            let c = seats_for_plan(tier);
            prop_assert_eq!(seats_remaining(c + k, tier), 0);
        }

        #[test]
        fn remaining_plus_members_equals_capacity_below_limit(
            tier in any_tier(),
            m in 0u32..=75,
        ) {
            let c = seats_for_plan(tier);
            prop_assume!(m <= c);
            prop_assert_eq!(seats_remaining(m, tier) + m, c);
        }

        #[test]
        fn can_invite_matches_exceed_check(tier in any_tier(), m in 0u32..200) {
            let usage = SeatUsage::compute(m, tier);
            prop_assert_eq!(usage.can_invite, !will_exceed_seats(m, tier));
        }
    }
}
