/**
 * Session Tokens
 *
 * This module issues and verifies the two JWTs of a session:
 *
 * - the **access token**, short-lived, sent with every request (cookie or
 *   `Authorization: Bearer`), carrying id, email, username and full name;
 * - the **refresh token**, long-lived, only used to mint a new pair, carrying
 *   just the user id.
 *
 * Each kind has its own secret and lifetime. Every token carries a random
 * `jti`, so two tokens issued in the same second are still distinct; this is
 * what makes a superseded refresh token detectable.
 */

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::store::UserStore;
use crate::backend::auth::users::User;
use crate::backend::error::BackendError;
use crate::shared::AppConfig;

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Unique token id
    pub jti: String,
}

/// Refresh token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefreshClaims {
    /// User ID
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
}

impl AccessClaims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::MalformedSubject)
    }
}

impl RefreshClaims {
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::MalformedSubject)
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    /// Bad signature, expired, or not a JWT at all
    #[error("invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
    #[error("token subject is not a user id")]
    MalformedSubject,
}

/// Access and refresh token issued together
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(TokenError::Signing)
    }

    fn verify<C: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<C, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        decode::<C>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

/// Signs and verifies session tokens
///
/// Built once from configuration and shared through application state.
pub struct TokenIssuer {
    access: TokenKeys,
    refresh: TokenKeys,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_ttl", &self.access.ttl)
            .field("refresh_ttl", &self.refresh.ttl)
            .finish_non_exhaustive()
    }
}

fn now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

impl TokenIssuer {
    pub fn new(
        access_secret: &str,
        access_ttl: Duration,
        refresh_secret: &str,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access: TokenKeys::new(access_secret, access_ttl),
            refresh: TokenKeys::new(refresh_secret, refresh_ttl),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.access_token_secret,
            config.access_token_ttl,
            &config.refresh_token_secret,
            config.refresh_token_ttl,
        )
    }

    /// Create an access token for a user
    pub fn create_access_token(&self, user: &User) -> Result<String, TokenError> {
        let iat = now();
        let claims = AccessClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            exp: iat + self.access.ttl.as_secs(),
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        self.access.sign(&claims)
    }

    /// Create a refresh token for a user
    pub fn create_refresh_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        let iat = now();
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp: iat + self.refresh.ttl.as_secs(),
            iat,
            jti: Uuid::new_v4().to_string(),
        };
        self.refresh.sign(&claims)
    }

    /// Create both tokens for a user
    pub fn create_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.create_access_token(user)?,
            refresh_token: self.create_refresh_token(user.id)?,
        })
    }

    /// Verify an access token's signature and expiry
    pub fn verify_access_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.access.verify(token)
    }

    /// Verify a refresh token's signature and expiry
    pub fn verify_refresh_token(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        self.refresh.verify(token)
    }
}

pub(crate) const TOKEN_FAILURE: &str = "Something went wrong while generating refresh and access token";

/// Issue a token pair for a user and persist the refresh token
///
/// The stored refresh token is overwritten, so any earlier session of the
/// same user can no longer refresh.
pub async fn generate_access_and_refresh_tokens(
    store: &dyn UserStore,
    issuer: &TokenIssuer,
    user_id: Uuid,
) -> Result<TokenPair, BackendError> {
    let user = store
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user {} for token issue: {:?}", user_id, e);
            BackendError::internal(TOKEN_FAILURE)
        })?
        .ok_or_else(|| {
            tracing::error!("User {} vanished before token issue", user_id);
            BackendError::internal(TOKEN_FAILURE)
        })?;

    let pair = issuer.create_pair(&user).map_err(|e| {
        tracing::error!("Failed to create tokens: {:?}", e);
        BackendError::internal(TOKEN_FAILURE)
    })?;

    store
        .set_refresh_token(user.id, Some(&pair.refresh_token))
        .await
        .map_err(|e| {
            tracing::error!("Failed to store refresh token: {:?}", e);
            BackendError::internal(TOKEN_FAILURE)
        })?;

    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::store::MemoryUserStore;
    use crate::backend::auth::users::NewUser;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(
            "access-secret",
            Duration::from_secs(900),
            "refresh-secret",
            Duration::from_secs(3600),
        )
    }

    fn user() -> User {
        NewUser::new("alice", "alice@example.com", "Alice", "a".into(), None, "h".into())
            .into_user(Utc::now())
    }

    #[test]
    fn test_access_token_round_trip() {
        let user = user();
        let issuer = issuer();
        let token = issuer.create_access_token(&user).unwrap();

        let claims = issuer.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_refresh_token_ttl() {
        let user = user();
        let issuer = issuer();
        let claims = issuer
            .verify_refresh_token(&issuer.create_refresh_token(user.id).unwrap())
            .unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.user_id().unwrap(), user.id);
    }

    #[test]
    fn test_tokens_are_unique() {
        let user = user();
        let issuer = issuer();
        let a = issuer.create_refresh_token(user.id).unwrap();
        let b = issuer.create_refresh_token(user.id).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_kinds_do_not_cross_verify() {
        let user = user();
        let issuer = issuer();
        let pair = issuer.create_pair(&user).unwrap();
        assert!(issuer.verify_refresh_token(&pair.access_token).is_err());
        assert!(issuer.verify_access_token(&pair.refresh_token).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let issuer = issuer();
        let mut token = issuer.create_access_token(&user()).unwrap();
        token.push('x');
        assert!(matches!(issuer.verify_access_token(&token), Err(TokenError::Invalid(_))));
        assert!(issuer.verify_access_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let issuer = issuer();
        let past = now() - 7200;
        let claims = AccessClaims {
            sub: Uuid::new_v4().to_string(),
            email: "e".into(),
            username: "u".into(),
            full_name: "f".into(),
            exp: past + 60,
            iat: past,
            jti: "j".into(),
        };
        let token = issuer.access.sign(&claims).unwrap();
        assert!(matches!(issuer.verify_access_token(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_malformed_subject() {
        let claims = RefreshClaims {
            sub: "not-a-uuid".into(),
            exp: 0,
            iat: 0,
            jti: "j".into(),
        };
        assert!(matches!(claims.user_id(), Err(TokenError::MalformedSubject)));
    }

    #[tokio::test]
    async fn test_generate_tokens_persists_refresh_token() {
        let store = MemoryUserStore::new();
        let issuer = issuer();
        let user = store
            .create_user(NewUser::new("alice", "a@example.com", "A", "a".into(), None, "h".into()))
            .await
            .unwrap();

        let first = generate_access_and_refresh_tokens(&store, &issuer, user.id).await.unwrap();
        let second = generate_access_and_refresh_tokens(&store, &issuer, user.id).await.unwrap();
        assert_ne!(first.refresh_token, second.refresh_token);

        let stored = store.get_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token, Some(second.refresh_token));
    }

    #[tokio::test]
    async fn test_generate_tokens_for_missing_user_is_internal() {
        let store = MemoryUserStore::new();
        let err = generate_access_and_refresh_tokens(&store, &issuer(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), TOKEN_FAILURE);
    }
}
