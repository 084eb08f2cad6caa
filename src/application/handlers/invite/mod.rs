//! Invite handlers.
//!
//! ## Commands
//! - Creating an invite and emailing it
//! - Resending an invite email
//! - Accepting an invite
//!
//! ## Queries
//! - List a vault's invites

mod accept_invite;
mod create_invite;
mod list_invites;
mod resend_invite;

use crate::domain::vault::{DEFAULT_EXPIRY_HOURS, RESEND_COOLDOWN_MINUTES};

// Commands
pub use accept_invite::{AcceptInviteCommand, AcceptInviteHandler, AcceptInviteResult, AcceptOutcome};
pub use create_invite::{CreateInviteCommand, CreateInviteHandler, CreateInviteResult};
pub use resend_invite::{ResendInviteCommand, ResendInviteHandler, ResendInviteResult};

// Queries
pub use list_invites::{ListInvitesHandler, ListInvitesQuery, ListInvitesResult};

/// Inviter name used when the original inviter is not the caller.
const FALLBACK_INVITER_NAME: &str = "A team member";

/// Settings shared by invite handlers.
#[derive(Debug, Clone)]
pub struct InviteSettings {
    /// Base URL of the web app; invite links are `{app_url}/invite/{token}`.
    pub app_url: String,
    pub default_expiry_hours: u32,
    pub resend_cooldown_minutes: u32,
}

impl Default for InviteSettings {
    fn default() -> Self {
        Self {
            app_url: "http://localhost:3000".to_string(),
            default_expiry_hours: DEFAULT_EXPIRY_HOURS,
            resend_cooldown_minutes: RESEND_COOLDOWN_MINUTES,
        }
    }
}
