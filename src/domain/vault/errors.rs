//! Vault-level error type used by the application layer.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Unauthenticated | 401 |
//! | Forbidden | 403 |
//! | VaultNotFound / InviteNotFound / MemberNotFound | 404 |
//! | InvalidTier / ValidationFailed | 400 |
//! | SeatGuard | 409 |
//! | Invite | 400 / 403 / 429 (per variant) |
//! | Notification / Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::{InviteError, SeatGuardError, UnknownPlanTier};

/// Errors surfaced by vault plan and invite operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// No authenticated caller.
    Unauthenticated,

    /// Caller lacks the role for the operation. Carries the full message.
    Forbidden(String),

    VaultNotFound,

    InviteNotFound,

    /// Target user holds no membership in the vault.
    MemberNotFound,

    /// Tier string outside the closed set.
    InvalidTier(String),

    /// Seat capacity violation, relayed verbatim.
    SeatGuard(SeatGuardError),

    Invite(InviteError),

    ValidationFailed { field: String, message: String },

    /// Invite email could not be delivered.
    Notification(String),

    Infrastructure(String),
}

impl VaultError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        VaultError::Forbidden(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        VaultError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        VaultError::Notification(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        VaultError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            VaultError::Unauthenticated => ErrorCode::Unauthorized,
            VaultError::Forbidden(_) => ErrorCode::Forbidden,
            VaultError::VaultNotFound => ErrorCode::VaultNotFound,
            VaultError::InviteNotFound => ErrorCode::InviteNotFound,
            VaultError::MemberNotFound => ErrorCode::MemberNotFound,
            VaultError::InvalidTier(_) => ErrorCode::InvalidTier,
            VaultError::SeatGuard(SeatGuardError::SeatLimitReached { .. }) => {
                ErrorCode::SeatLimitReached
            }
            VaultError::SeatGuard(SeatGuardError::PlanChangeExceedsSeats { .. }) => {
                ErrorCode::PlanChangeNotAllowed
            }
            VaultError::Invite(InviteError::ResendTooSoon { .. }) => ErrorCode::Conflict,
            VaultError::Invite(InviteError::EmailNotVerified)
            | VaultError::Invite(InviteError::EmailMismatch { .. }) => ErrorCode::Forbidden,
            VaultError::Invite(
                InviteError::AlreadyAccepted
                | InviteError::Expired
                | InviteError::Revoked
                | InviteError::NotPending(_),
            ) => ErrorCode::InvalidStateTransition,
            VaultError::Invite(_) | VaultError::ValidationFailed { .. } => {
                ErrorCode::ValidationFailed
            }
            VaultError::Notification(_) => ErrorCode::NotificationError,
            VaultError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Returns the user-facing message.
    ///
    /// Seat guard and invite messages pass through unchanged.
    pub fn message(&self) -> String {
        match self {
            VaultError::Unauthenticated => "Unauthorized".to_string(),
            VaultError::Forbidden(msg) => msg.clone(),
            VaultError::VaultNotFound => "Vault not found".to_string(),
            VaultError::InviteNotFound => "Invite not found".to_string(),
            VaultError::MemberNotFound => "Member not found".to_string(),
            VaultError::InvalidTier(_) => "Invalid plan tier".to_string(),
            VaultError::SeatGuard(err) => err.message(),
            VaultError::Invite(err) => err.to_string(),
            VaultError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            VaultError::Notification(_) => "Failed to send email".to_string(),
            VaultError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }

    /// Returns true if this error should trigger a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VaultError::Infrastructure(_) | VaultError::Notification(_)
        )
    }
}

impl std::fmt::Display for VaultError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VaultError::Notification(detail) | VaultError::Infrastructure(detail) => {
                write!(f, "{}: {}", self.message(), detail)
            }
            _ => write!(f, "{}", self.message()),
        }
    }
}

impl std::error::Error for VaultError {}

impl From<SeatGuardError> for VaultError {
    fn from(err: SeatGuardError) -> Self {
        VaultError::SeatGuard(err)
    }
}

impl From<InviteError> for VaultError {
    fn from(err: InviteError) -> Self {
        VaultError::Invite(err)
    }
}

impl From<UnknownPlanTier> for VaultError {
    fn from(err: UnknownPlanTier) -> Self {
        VaultError::InvalidTier(err.0)
    }
}

impl From<ValidationError> for VaultError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::EmptyField { ref field }
            | ValidationError::OutOfRange { ref field, .. }
            | ValidationError::InvalidFormat { ref field, .. } => {
                VaultError::validation(field.clone(), err.to_string())
            }
        }
    }
}

impl From<DomainError> for VaultError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::VaultNotFound => VaultError::VaultNotFound,
            ErrorCode::InviteNotFound => VaultError::InviteNotFound,
            ErrorCode::NotificationError => VaultError::Notification(err.message),
            _ => VaultError::Infrastructure(err.to_string()),
        }
    }
}
