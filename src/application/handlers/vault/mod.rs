//! Vault plan handlers.
//!
//! ## Commands
//! - Creating a vault
//! - Changing a vault's plan tier
//! - Removing a member
//!
//! ## Queries
//! - Get a vault's plan and seat usage
//! - Check whether a vault can take another member
//! - List the plan catalog

mod change_vault_plan;
mod check_can_invite;
mod create_vault;
mod get_vault_plan;
mod list_plans;
mod remove_member;

// Commands
pub use change_vault_plan::{ChangeVaultPlanCommand, ChangeVaultPlanHandler, ChangeVaultPlanResult};
pub use create_vault::{CreateVaultCommand, CreateVaultHandler, CreateVaultResult};
pub use remove_member::{RemoveMemberCommand, RemoveMemberHandler, RemoveMemberResult};

// Queries
pub use check_can_invite::{CheckCanInviteHandler, CheckCanInviteQuery, CheckCanInviteResult};
pub use get_vault_plan::{GetVaultPlanHandler, GetVaultPlanQuery, GetVaultPlanResult};
pub use list_plans::{ListPlansHandler, ListPlansQuery, ListPlansResult};
