//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod access;
pub mod invite;
pub mod vault;

#[cfg(test)]
pub(crate) mod test_support;

pub use invite::{
    AcceptInviteCommand, AcceptInviteHandler, AcceptInviteResult, AcceptOutcome,
    CreateInviteCommand, CreateInviteHandler, CreateInviteResult, InviteSettings,
    ListInvitesHandler, ListInvitesQuery, ListInvitesResult, ResendInviteCommand,
    ResendInviteHandler, ResendInviteResult,
};
pub use vault::{
    ChangeVaultPlanCommand, ChangeVaultPlanHandler, ChangeVaultPlanResult, CheckCanInviteHandler,
    CheckCanInviteQuery, CheckCanInviteResult, CreateVaultCommand, CreateVaultHandler,
    CreateVaultResult, GetVaultPlanHandler, GetVaultPlanQuery, GetVaultPlanResult,
    ListPlansHandler, ListPlansQuery, ListPlansResult, RemoveMemberCommand, RemoveMemberHandler,
    RemoveMemberResult,
};
