//! Bearer tokens for StackIt sessions.
//!
//! A token is an HS256 JWT naming the account it was issued to. It carries
//! no authority of its own: [`crate::middleware::auth::AuthUser`] reloads
//! the account on every request, so a ban or role change applies to tokens
//! that are already out in the wild.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stackit_core::roles::Role;
use stackit_core::types::DbId;
use uuid::Uuid;

/// One week.
const DEFAULT_EXPIRY_HOURS: i64 = 168;

/// Token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: DbId,
    pub username: String,
    /// Role when the token was issued. Display only.
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Why a presented token was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is invalid: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_HOURS`
    /// (default 168).
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let expiry_hours = match std::env::var("JWT_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse()
                .expect("JWT_EXPIRY_HOURS must be a whole number of hours"),
            Err(_) => DEFAULT_EXPIRY_HOURS,
        };

        Self {
            secret,
            expiry_hours,
        }
    }
}

/// Sign a token for `user_id`, valid for `config.expiry_hours`.
pub fn generate_token(
    user_id: DbId,
    username: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        username: username.to_owned(),
        role,
        exp: iat + config.expiry_hours * 3600,
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check the signature and expiry of `token` and return its claims.
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid(e),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            expiry_hours: 2,
        }
    }

    #[test]
    fn issued_token_names_the_account() {
        let cfg = config("stackit-test-secret");
        let token = generate_token(7, "asker", Role::User, &cfg).unwrap();

        let claims = validate_token(&token, &cfg).unwrap();
        assert_eq!((claims.sub, claims.username.as_str()), (7, "asker"));
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 2 * 3600);
    }

    #[test]
    fn every_token_gets_its_own_id() {
        let cfg = config("stackit-test-secret");
        let a = validate_token(&generate_token(1, "a", Role::User, &cfg).unwrap(), &cfg).unwrap();
        let b = validate_token(&generate_token(1, "a", Role::User, &cfg).unwrap(), &cfg).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let cfg = config("stackit-test-secret");
        let now = chrono::Utc::now().timestamp();
        let stale = Claims {
            sub: 1,
            username: "old".to_string(),
            role: Role::Admin,
            exp: now - 3600,
            iat: now - 7200,
            jti: "stale".to_string(),
        };
        let token = encode(
            &Header::default(),
            &stale,
            &EncodingKey::from_secret(cfg.secret.as_bytes()),
        )
        .unwrap();

        assert_matches!(validate_token(&token, &cfg), Err(TokenError::Expired));
    }

    #[test]
    fn foreign_signature_is_invalid() {
        let token = generate_token(1, "u", Role::User, &config("one")).unwrap();
        assert_matches!(
            validate_token(&token, &config("two")),
            Err(TokenError::Invalid(_))
        );
        assert_matches!(
            validate_token("garbage", &config("one")),
            Err(TokenError::Invalid(_))
        );
    }
}
