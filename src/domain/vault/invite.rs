//! Vault invitations.
//!
//! An invite is a token-addressed offer of membership. It is created by an
//! Owner or Admin, emailed to the invitee, and accepted by a signed-in user
//! whose verified email matches.
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──accept──▶ Accepted
//!    │
//!    └──revoke──▶ Revoked
//! ```
//!
//! Expiry is not a stored state; a pending invite past `expires_at` is
//! simply no longer usable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::foundation::{InviteId, Timestamp, UserId, ValidationError, VaultId};

use super::VaultRole;

/// Expiry applied when the inviter does not choose one.
pub const DEFAULT_EXPIRY_HOURS: u32 = 72;

/// Longest expiry an inviter may choose (30 days).
pub const MAX_EXPIRY_HOURS: u32 = 720;

/// Minimum gap between two emails for the same invite.
pub const RESEND_COOLDOWN_MINUTES: u32 = 10;

/// Invitation failures. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InviteError {
    #[error("inviteeEmail is required")]
    MissingEmail,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("expiryHours must be between 1 and 720, got {0}")]
    InvalidExpiry(u32),

    #[error("This invitation has already been accepted.")]
    AlreadyAccepted,

    #[error("This invitation has expired.")]
    Expired,

    #[error("This invitation has been revoked.")]
    Revoked,

    #[error("Cannot resend {0} invite")]
    NotPending(InviteStatus),

    #[error("Please wait {wait_minutes} minute(s) before resending")]
    ResendTooSoon { wait_minutes: u32 },

    #[error("Please verify your email address before accepting invitations.")]
    EmailNotVerified,

    #[error("This invitation was sent to {invitee_email}. Please sign in with that email address.")]
    EmailMismatch { invitee_email: String },
}

/// Invitation status as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteStatus {
    Pending,
    Accepted,
    Revoked,
}

impl InviteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Accepted => "accepted",
            InviteStatus::Revoked => "revoked",
        }
    }
}

impl fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InviteStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InviteStatus::Pending),
            "accepted" => Ok(InviteStatus::Accepted),
            "revoked" => Ok(InviteStatus::Revoked),
            other => Err(ValidationError::invalid_format(
                "status",
                format!("unknown invite status '{}'", other),
            )),
        }
    }
}

/// Opaque secret carried in the invite link. 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InviteToken(String);

impl InviteToken {
    const LEN: usize = 64;

    /// Generates a fresh token from two random UUIDv4 values (244 random bits).
    pub fn generate() -> Self {
        Self(format!(
            "{}{}",
            Uuid::new_v4().simple(),
            Uuid::new_v4().simple()
        ))
    }

    /// Validates a token received from a link.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let well_formed = value.len() == Self::LEN
            && value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        if !well_formed {
            return Err(ValidationError::invalid_format(
                "token",
                "expected 64 lowercase hex characters",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InviteToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trims and lowercases an email, rejecting obviously malformed input.
pub fn normalize_email(email: &str) -> Result<String, InviteError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(InviteError::MissingEmail);
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(email.to_lowercase())
        }
        _ => Err(InviteError::InvalidEmail(email.to_string())),
    }
}

/// A pending or settled invitation to join a vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    pub id: InviteId,
    pub vault_id: VaultId,
    pub inviter_id: UserId,
    pub invitee_email: String,
    pub role: VaultRole,
    pub token: InviteToken,
    pub status: InviteStatus,
    pub expires_at: Timestamp,
    pub last_sent_at: Timestamp,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Invite {
    /// Issues a new pending invite with a fresh token.
    ///
    /// # Errors
    ///
    /// - `MissingEmail` / `InvalidEmail` for a malformed invitee address
    /// - `InvalidExpiry` when `expiry_hours` is outside `1..=720`
    pub fn issue(
        vault_id: VaultId,
        inviter_id: UserId,
        invitee_email: &str,
        role: VaultRole,
        expiry_hours: u32,
        now: Timestamp,
    ) -> Result<Self, InviteError> {
        let invitee_email = normalize_email(invitee_email)?;
        if !(1..=MAX_EXPIRY_HOURS).contains(&expiry_hours) {
            return Err(InviteError::InvalidExpiry(expiry_hours));
        }

        Ok(Self {
            id: InviteId::new(),
            vault_id,
            inviter_id,
            invitee_email,
            role,
            token: InviteToken::generate(),
            status: InviteStatus::Pending,
            expires_at: now.plus_hours(i64::from(expiry_hours)),
            last_sent_at: now,
            accepted_at: None,
            created_at: now,
        })
    }

    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_before(&now)
    }

    /// Whether `email` is the address this invite was sent to.
    pub fn is_addressed_to(&self, email: &str) -> bool {
        self.invitee_email.eq_ignore_ascii_case(email.trim())
    }

    /// Marks the invite accepted.
    pub fn accept(&mut self, now: Timestamp) -> Result<(), InviteError> {
        match self.status {
            InviteStatus::Accepted => return Err(InviteError::AlreadyAccepted),
            InviteStatus::Revoked => return Err(InviteError::Revoked),
            InviteStatus::Pending => {}
        }
        if self.is_expired(now) {
            return Err(InviteError::Expired);
        }
        self.status = InviteStatus::Accepted;
        self.accepted_at = Some(now);
        Ok(())
    }

    /// Checks that the invite email may be sent again now.
    pub fn can_resend(&self, now: Timestamp) -> Result<(), InviteError> {
        self.can_resend_after(now, RESEND_COOLDOWN_MINUTES)
    }

    /// As [`Invite::can_resend`] with an explicit cooldown.
    pub fn can_resend_after(&self, now: Timestamp, cooldown_minutes: u32) -> Result<(), InviteError> {
        if self.status != InviteStatus::Pending {
            return Err(InviteError::NotPending(self.status));
        }
        if self.is_expired(now) {
            return Err(InviteError::Expired);
        }

        let cooldown_ms = i64::from(cooldown_minutes) * 60_000;
        let elapsed_ms = now.duration_since(&self.last_sent_at).num_milliseconds();
        if elapsed_ms < cooldown_ms {
            let remaining_ms = cooldown_ms - elapsed_ms;
            let wait_minutes = (remaining_ms + 59_999) / 60_000;
            return Err(InviteError::ResendTooSoon {
                wait_minutes: u32::try_from(wait_minutes).unwrap_or(u32::MAX),
            });
        }
        Ok(())
    }

    pub fn mark_sent(&mut self, now: Timestamp) {
        self.last_sent_at = now;
    }

    /// Whole hours left before expiry, never less than one. Used in emails.
    pub fn hours_until_expiry(&self, now: Timestamp) -> u32 {
        let hours = self.expires_at.duration_since(&now).num_hours();
        u32::try_from(hours.max(1)).unwrap_or(MAX_EXPIRY_HOURS)
    }

    /// Link the invitee follows to accept.
    pub fn url(&self, app_url: &str) -> String {
        format!("{}/invite/{}", app_url.trim_end_matches('/'), self.token)
    }
}
