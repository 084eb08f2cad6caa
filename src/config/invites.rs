//! Invite flow configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::InviteSettings;
use crate::domain::vault::{DEFAULT_EXPIRY_HOURS, MAX_EXPIRY_HOURS, RESEND_COOLDOWN_MINUTES};

/// Invite links, expiry and the email function.
#[derive(Debug, Clone, Deserialize)]
pub struct InviteConfig {
    /// Base URL of the web app that serves `/invite/{token}`
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Edge function that sends invite emails. Invites are only logged when unset.
    pub email_function_url: Option<String>,

    /// Service key presented to the email function
    pub service_key: Option<SecretString>,

    #[serde(default = "default_expiry_hours")]
    pub default_expiry_hours: u32,

    #[serde(default = "default_resend_cooldown")]
    pub resend_cooldown_minutes: u32,

    /// Email function request timeout in seconds
    #[serde(default = "default_email_timeout")]
    pub email_timeout_secs: u64,
}

impl InviteConfig {
    pub fn email_timeout(&self) -> Duration {
        Duration::from_secs(self.email_timeout_secs)
    }

    /// Settings handed to the invite handlers.
    pub fn settings(&self) -> InviteSettings {
        InviteSettings {
            app_url: self.app_url.trim_end_matches('/').to_string(),
            default_expiry_hours: self.default_expiry_hours,
            resend_cooldown_minutes: self.resend_cooldown_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !is_http_url(&self.app_url) {
            return Err(ValidationError::InvalidUrl("app_url"));
        }
        if self.default_expiry_hours == 0 || self.default_expiry_hours > MAX_EXPIRY_HOURS {
            return Err(ValidationError::InvalidInviteExpiry);
        }
        if let Some(url) = &self.email_function_url {
            if !is_http_url(url) {
                return Err(ValidationError::InvalidUrl("email_function_url"));
            }
            if self.service_key.is_none() {
                return Err(ValidationError::MissingRequired(
                    "VAULT_GOVERNANCE__INVITES__SERVICE_KEY",
                ));
            }
        }
        if self.email_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            app_url: default_app_url(),
            email_function_url: None,
            service_key: None,
            default_expiry_hours: default_expiry_hours(),
            resend_cooldown_minutes: default_resend_cooldown(),
            email_timeout_secs: default_email_timeout(),
        }
    }
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_expiry_hours() -> u32 {
    DEFAULT_EXPIRY_HOURS
}

fn default_resend_cooldown() -> u32 {
    RESEND_COOLDOWN_MINUTES
}

fn default_email_timeout() -> u64 {
    10
}
