/**
 * Refresh Handler
 *
 * `POST /api/v1/users/refresh-token`
 *
 * Exchanges the current refresh token for a new pair. The incoming token
 * must verify and must equal the one stored on the user; the stored value
 * is then swapped atomically, so a token can be used once.
 */

use axum::{extract::State, Json};
use bytes::Bytes;
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::{cookie_value, with_session, REFRESH_COOKIE};
use crate::backend::auth::handlers::types::RefreshRequest;
use crate::backend::auth::sessions::TokenPair;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::shared::error::non_blank;

const STALE_TOKEN: &str = "Refresh token is expired or used";

/// Refresh token from the cookie, or from a JSON body
fn incoming_token(jar: &CookieJar, body: &[u8]) -> Option<String> {
    cookie_value(jar, REFRESH_COOKIE).or_else(|| {
        if body.is_empty() {
            return None;
        }
        serde_json::from_slice::<RefreshRequest>(body)
            .ok()
            .and_then(|r| non_blank(r.refresh_token.as_deref()).map(str::to_string))
    })
}

pub async fn refresh_access_token(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> BackendResult<(CookieJar, Json<TokenPair>)> {
    let incoming = incoming_token(&jar, &body)
        .ok_or_else(|| BackendError::unauthorized("Unauthorized request"))?;

    let claims = state.tokens.verify_refresh_token(&incoming).map_err(|e| {
        tracing::warn!("Invalid refresh token: {}", e);
        BackendError::unauthorized("Invalid refresh token")
    })?;
    let user_id = claims.user_id()?;

    let user = state.users.get_user_by_id(user_id).await?.ok_or_else(|| {
        tracing::warn!("Refresh token for unknown user {}", user_id);
        BackendError::unauthorized("Invalid refresh token")
    })?;

    if user.refresh_token.as_deref() != Some(incoming.as_str()) {
        tracing::warn!("Stale refresh token for user {}", user.username);
        return Err(BackendError::unauthorized(STALE_TOKEN));
    }

    let pair = state.tokens.create_pair(&user)?;
    if !state
        .users
        .rotate_refresh_token(user.id, &incoming, &pair.refresh_token)
        .await?
    {
        tracing::warn!("Concurrent refresh lost for user {}", user.username);
        return Err(BackendError::unauthorized(STALE_TOKEN));
    }

    tracing::info!("Access token refreshed for {}", user.username);
    let jar = with_session(jar, &pair, state.config.cookie_secure);
    Ok((jar, Json(pair)))
}
