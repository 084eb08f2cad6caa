//! Vault plan and seat governance.
//!
//! Every vault sits on a plan tier that caps its member count:
//!
//! - **Catalog**: tier to seat capacity, plus display metadata
//! - **Capacity**: remaining-seat arithmetic
//! - **Guards**: block plan changes and member additions that would
//!   overflow capacity
//!
//! Roles and invitations build on the guards to admit new members.

mod aggregate;
mod capacity;
mod catalog;
mod errors;
mod guards;
mod invite;
mod role;
mod tier;

pub use aggregate::Vault;
pub use capacity::{seats_remaining, will_exceed_seats, SeatUsage};
pub use catalog::{seats_for_plan, PlanCatalog, PlanDisplay, PlanEntry};
pub use errors::VaultError;
pub use guards::{assert_can_add_member, assert_plan_change_allowed, SeatGuardError};
pub use invite::{
    normalize_email, Invite, InviteError, InviteStatus, InviteToken, DEFAULT_EXPIRY_HOURS,
    MAX_EXPIRY_HOURS, RESEND_COOLDOWN_MINUTES,
};
pub use role::{permission_denied_message, VaultAction, VaultRole};
pub use tier::{PlanTier, UnknownPlanTier};
