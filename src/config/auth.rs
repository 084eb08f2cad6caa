//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length in bytes.
const MIN_SECRET_BYTES: usize = 32;

/// Authentication configuration (HS256 access tokens from the identity provider)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Expected `iss` claim
    pub issuer: String,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Shared signing secret
    pub jwt_secret: SecretString,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// In production the issuer must be an HTTPS URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("VAULT_GOVERNANCE__AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("VAULT_GOVERNANCE__AUTH__AUDIENCE"));
        }
        if self.jwt_secret.expose_secret().len() < MIN_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort);
        }

        if *environment == Environment::Production && !self.issuer.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }

        Ok(())
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
