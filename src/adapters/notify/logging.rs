//! Notifier that only logs. Used when no email function is configured.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{InviteEmail, InviteNotifier};

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingInviteNotifier;

impl LoggingInviteNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl InviteNotifier for LoggingInviteNotifier {
    async fn send_invite(&self, email: &InviteEmail) -> Result<(), DomainError> {
        tracing::info!(
            vault = %email.vault_name,
            invitee = %email.invitee_email,
            invite_url = %email.invite_url,
            expiry_hours = email.expiry_hours,
            "Invite email not sent: no email function configured"
        );
        Ok(())
    }
}
