/**
 * Authentication Middleware
 *
 * Protects routes that require a session. The access token is taken from
 * the `accessToken` cookie, or from an `Authorization: Bearer` header when
 * no cookie is present. The token is verified, the user it names is loaded,
 * and the public view of that user is attached to the request extensions.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::{cookie_value, ACCESS_COOKIE};
use crate::backend::auth::users::PublicUser;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// User attached to a request by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub PublicUser);

/// Access token from the session cookie or the bearer header
pub fn extract_token(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    cookie_value(jar, ACCESS_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Authentication middleware
///
/// Returns 401 when the token is missing, invalid or expired, or when the
/// user it refers to no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let token = extract_token(&jar, request.headers()).ok_or_else(|| {
        tracing::warn!("Missing access token on {}", request.uri().path());
        BackendError::unauthorized("Unauthorized request")
    })?;

    let claims = state.tokens.verify_access_token(&token).map_err(|e| {
        tracing::warn!("Invalid access token: {}", e);
        BackendError::unauthorized("Invalid Access Token")
    })?;

    let user_id = claims.user_id().map_err(|e| {
        tracing::warn!("Invalid access token: {}", e);
        BackendError::unauthorized("Invalid Access Token")
    })?;

    let user = state.users.get_user_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!("Access token for unknown user {}", user_id);
        BackendError::unauthorized("Invalid Access Token")
    })?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser(PublicUser::from(user)));

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind [`auth_middleware`]; elsewhere it rejects
/// with 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub PublicUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .map(|user| AuthUser(user.0.clone()))
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Unauthorized request")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware::from_fn_with_state, routing::get, Router};
    use chrono::Utc;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::backend::auth::store::{MemoryUserStore, UserStore};
    use crate::backend::auth::users::NewUser;
    use crate::backend::media::LocalMediaStore;
    use crate::shared::AppConfig;

    async fn state() -> (AppState, PublicUser) {
        let config = AppConfig::builder()
            .access_token_secret("access")
            .refresh_token_secret("refresh")
            .build()
            .unwrap();
        let store = MemoryUserStore::new();
        let user = store
            .create_user(NewUser::new("bob", "bob@example.com", "Bob", "a".into(), None, "h".into()))
            .await
            .unwrap();
        let media = Arc::new(LocalMediaStore::new(&config.public_dir, &config.public_base_url));
        (AppState::new(Arc::new(store), media, config), PublicUser::from(user))
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/me", get(|AuthUser(user): AuthUser| async move { user.username }))
            .route_layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    async fn status(app: Router, request: axum::http::Request<Body>) -> StatusCode {
        app.oneshot(request).await.unwrap().status()
    }

    fn get_me() -> axum::http::request::Builder {
        axum::http::Request::builder().uri("/me")
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let (state, _) = state().await;
        let request = get_me().body(Body::empty()).unwrap();
        assert_eq!(status(app(state), request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_token_accepted() {
        let (state, user) = state().await;
        let stored = state.users.get_user_by_id(user.id).await.unwrap().unwrap();
        let token = state.tokens.create_access_token(&stored).unwrap();

        let request = get_me()
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status(app(state), request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_cookie_token_accepted() {
        let (state, user) = state().await;
        let stored = state.users.get_user_by_id(user.id).await.unwrap().unwrap();
        let token = state.tokens.create_access_token(&stored).unwrap();

        let request = get_me()
            .header("cookie", format!("{}={}", ACCESS_COOKIE, token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status(app(state), request).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_tampered_token_rejected() {
        let (state, user) = state().await;
        let stored = state.users.get_user_by_id(user.id).await.unwrap().unwrap();
        let token = state.tokens.create_access_token(&stored).unwrap();

        let request = get_me()
            .header(AUTHORIZATION, format!("Bearer {}x", token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status(app(state), request).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_for_unknown_user_rejected() {
        let (state, _) = state().await;
        let ghost = NewUser::new("ghost", "g@example.com", "G", "a".into(), None, "h".into())
            .into_user(Utc::now());
        let token = state.tokens.create_access_token(&ghost).unwrap();

        let request = get_me()
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(status(app(state), request).await, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_cookie_preferred_over_header() {
        let jar = CookieJar::new().add(axum_extra::extract::cookie::Cookie::new(ACCESS_COOKIE, "c"));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer h".parse().unwrap());
        assert_eq!(extract_token(&jar, &headers), Some("c".to_string()));
        assert_eq!(extract_token(&CookieJar::new(), &headers), Some("h".to_string()));

        headers.insert(AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(extract_token(&CookieJar::new(), &headers), None);
    }
}
