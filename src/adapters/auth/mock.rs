//! Mock session validator for tests and local development.
//!
//! # Example
//!
//! ```ignore
//! use vault_governance::adapters::auth::MockSessionValidator;
//!
//! let validator = MockSessionValidator::new()
//!     .with_test_user("owner-token", "owner-1")
//!     .with_unverified_user("fresh-token", "new-1");
//!
//! let owner = validator.validate("owner-token").await?;
//! assert!(owner.email_verified);
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Session validator backed by a fixed token → user map.
///
/// Tokens not in the map return `InvalidToken`.
#[derive(Debug, Default, Clone)]
pub struct MockSessionValidator {
    tokens: HashMap<String, AuthenticatedUser>,
    force_error: Option<AuthError>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `token` as `user`.
    pub fn with_user(mut self, token: impl Into<String>, user: AuthenticatedUser) -> Self {
        self.tokens.insert(token.into(), user);
        self
    }

    /// Accept `token` as a verified user with email `{user_id}@test.example.com`.
    pub fn with_test_user(self, token: impl Into<String>, user_id: impl Into<String>) -> Self {
        self.with_generated_user(token, user_id, true)
    }

    /// As [`MockSessionValidator::with_test_user`] but with an unverified email.
    pub fn with_unverified_user(
        self,
        token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        self.with_generated_user(token, user_id, false)
    }

    /// Fail every validation with `error`.
    pub fn with_error(mut self, error: AuthError) -> Self {
        self.force_error = Some(error);
        self
    }

    fn with_generated_user(
        self,
        token: impl Into<String>,
        user_id: impl Into<String>,
        email_verified: bool,
    ) -> Self {
        let user_id = user_id.into();
        match UserId::new(user_id.as_str()) {
            Ok(id) => {
                let user = AuthenticatedUser::new(
                    id,
                    format!("{}@test.example.com", user_id),
                    Some(format!("Test User {}", user_id)),
                    email_verified,
                );
                self.with_user(token, user)
            }
            Err(_) => self,
        }
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = &self.force_error {
            return Err(error.clone());
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
