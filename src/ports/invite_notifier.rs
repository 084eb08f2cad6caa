//! Invite notifier port.
//!
//! Delivers the invitation email. Delivery is a side effect outside the
//! governance core: a failed send never rolls back a created invite.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::DomainError;

/// Content of an invitation email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteEmail {
    pub vault_name: String,
    pub inviter_name: String,
    pub invitee_email: String,
    pub invite_url: String,
    pub expiry_hours: u32,
}

/// Sends invitation emails.
#[async_trait]
pub trait InviteNotifier: Send + Sync {
    /// Send one invitation email.
    ///
    /// # Errors
    ///
    /// - `NotificationError` when the provider rejects or cannot be reached
    async fn send_invite(&self, email: &InviteEmail) -> Result<(), DomainError>;
}
