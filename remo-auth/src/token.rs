//! Bearer-token signing and verification.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use remo_core::config::AuthConfig;
use remo_core::http::{header, HeaderMap};
use remo_core::{AppError, AuthClaims};

#[derive(Serialize, Deserialize)]
struct TokenClaims {
    #[serde(flatten)]
    identity: AuthClaims,
    exp: u64,
}

/// Sign a token carrying the identity's claims, expiring after the
/// configured lifetime.
pub fn sign_token(config: &AuthConfig, identity: &AuthClaims) -> Result<String, AppError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| AppError::Internal(err.to_string()))?
        .as_secs();
    let claims = TokenClaims {
        identity: identity.clone(),
        exp: now + config.expires_in,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|err| AppError::Internal(err.to_string()))
}

/// Verify a token. Any failure — bad signature, expiry, malformed claims —
/// yields `None`; verification never errors the request.
pub fn verify_token(config: &AuthConfig, token: &str) -> Option<AuthClaims> {
    decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims.identity)
}

/// Extract the bearer token from the `Authorization` header.
///
/// ```text
/// Authorization: Bearer xxx
/// ```
pub fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
