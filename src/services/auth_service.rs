//! Authentication service

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    utils::digests_match,
};

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
    #[serde(default)]
    pub metadata: Option<ClaimsMetadata>,
}

/// Identity-provider metadata carried in the token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimsMetadata {
    #[serde(default)]
    pub role: Option<String>,
}

impl Claims {
    pub fn role(&self) -> Option<&str> {
        self.metadata.as_ref()?.role.as_deref()
    }
}

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Check a shared API key against the configured one
    pub fn verify_api_key(provided: Option<&str>, expected: &str) -> AppResult<()> {
        let provided = provided
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AppError::MissingApiKey)?;

        if digests_match(provided, expected) {
            Ok(())
        } else {
            Err(AppError::InvalidApiKey)
        }
    }

    /// Pull the token out of an `Authorization: Bearer <token>` value
    pub fn bearer_token(header: &str) -> AppResult<&str> {
        header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthorized)
    }

    /// Verify an HS256 token and return its claims
    pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
