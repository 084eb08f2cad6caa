//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Vault handlers
    ChangeVaultPlanCommand, ChangeVaultPlanHandler, ChangeVaultPlanResult,
    CheckCanInviteHandler, CheckCanInviteQuery, CheckCanInviteResult,
    CreateVaultCommand, CreateVaultHandler, CreateVaultResult,
    GetVaultPlanHandler, GetVaultPlanQuery, GetVaultPlanResult,
    ListPlansHandler, ListPlansQuery, ListPlansResult,
    RemoveMemberCommand, RemoveMemberHandler, RemoveMemberResult,
    // Invite handlers
    AcceptInviteCommand, AcceptInviteHandler, AcceptInviteResult, AcceptOutcome,
    CreateInviteCommand, CreateInviteHandler, CreateInviteResult,
    InviteSettings,
    ListInvitesHandler, ListInvitesQuery, ListInvitesResult,
    ResendInviteCommand, ResendInviteHandler, ResendInviteResult,
};
