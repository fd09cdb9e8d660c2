//! Authentication and authorization
//!
//! Tokens carry the caller's scheme roles (`facility`, `tpa`, `nhis_admin`).
//! NHIS admins pass every role check.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domain_claims::UserRole;

/// Upper bound on token lifetime (one year)
pub const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Roles in the token that the scheme knows about
    pub fn user_roles(&self) -> Vec<UserRole> {
        self.roles.iter().filter_map(|r| UserRole::parse(r)).collect()
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: &str,
    roles: &[UserRole],
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let ttl = expiration_secs.min(MAX_TOKEN_TTL_SECS) as i64;
    let exp = now + Duration::seconds(ttl);

    let claims = Claims {
        sub: user_id.to_string(),
        roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

/// Checks if user has the required role
pub fn has_role(claims: &Claims, required: UserRole) -> bool {
    claims
        .user_roles()
        .iter()
        .any(|r| *r == required || *r == UserRole::NhisAdmin)
}

/// Succeeds when the caller holds any of `allowed`
pub fn require_any_role(claims: &Claims, allowed: &[UserRole]) -> Result<(), AuthError> {
    if allowed.iter().any(|role| has_role(claims, *role)) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(UserRole::as_str).collect();
    Err(AuthError::MissingPermission(names.join(" or ")))
}

/// Role sets per endpoint
pub mod permissions {
    use domain_claims::UserRole;

    pub const PARSE_ITEMS: &[UserRole] = &[UserRole::Facility, UserRole::Tpa, UserRole::NhisAdmin];
    pub const VALIDATE_CLAIMS: &[UserRole] = &[UserRole::Tpa, UserRole::NhisAdmin];
    pub const VALIDATE_BATCHES: &[UserRole] = &[UserRole::Tpa, UserRole::NhisAdmin];
}
