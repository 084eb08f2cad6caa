//! Invite email delivery through the hosted email function.
//!
//! The function accepts the `InviteEmail` payload as camelCase JSON and
//! renders and sends the message itself. We only care whether it answered
//! with a success status.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{InviteEmail, InviteNotifier};

/// Edge function endpoint configuration.
#[derive(Clone)]
pub struct EdgeFunctionConfig {
    /// Full URL of the send-invite function.
    pub endpoint: String,
    /// Bearer key presented to the function.
    pub service_key: SecretString,
    pub timeout: Duration,
}

/// Sends invite emails by POSTing to the edge function.
pub struct EdgeFunctionInviteNotifier {
    config: EdgeFunctionConfig,
    http_client: reqwest::Client,
}

impl EdgeFunctionInviteNotifier {
    pub fn new(config: EdgeFunctionConfig) -> Result<Self, DomainError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| notification_error(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            config,
            http_client,
        })
    }
}

fn notification_error(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::NotificationError, message)
}

#[async_trait]
impl InviteNotifier for EdgeFunctionInviteNotifier {
    async fn send_invite(&self, email: &InviteEmail) -> Result<(), DomainError> {
        let response = self
            .http_client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.service_key.expose_secret())
            .json(email)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Invite email function unreachable");
                notification_error(format!("Email function request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                error = %error_text,
                "Invite email function returned an error"
            );
            return Err(notification_error(format!(
                "Email function returned {}: {}",
                status, error_text
            ))
            .with_detail("status", status.as_u16().to_string()));
        }

        tracing::debug!(invitee = %email.invitee_email, "Invite email dispatched");
        Ok(())
    }
}

impl std::fmt::Debug for EdgeFunctionInviteNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EdgeFunctionInviteNotifier")
            .field("endpoint", &self.config.endpoint)
            .field("timeout", &self.config.timeout)
            .finish_non_exhaustive()
    }
}
