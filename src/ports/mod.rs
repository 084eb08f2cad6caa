//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Vault Ports
//!
//! - `VaultReader` - Vault snapshots (tier, member count)
//! - `VaultRepository` - Vault creation and conditional plan updates
//!
//! ## Membership Ports
//!
//! - `MembershipReader` - Role lookups for authorization
//! - `MembershipRepository` - Seat-conditional member inserts
//!
//! ## Invite Ports
//!
//! - `InviteRepository` - Invite persistence
//! - `InviteNotifier` - Invitation email delivery
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Bearer token validation

mod invite_notifier;
mod invite_repository;
mod membership_reader;
mod membership_repository;
mod session_validator;
mod vault_reader;
mod vault_repository;

pub use invite_notifier::{InviteEmail, InviteNotifier};
pub use invite_repository::InviteRepository;
pub use membership_reader::MembershipReader;
pub use membership_repository::{MembershipRepository, SeatClaim};
pub use session_validator::SessionValidator;
pub use vault_reader::VaultReader;
pub use vault_repository::{PlanUpdate, VaultRepository};
