/**
 * Logout Handler
 *
 * `POST /api/v1/users/logout` (session required)
 *
 * Clears the stored refresh token, so the current refresh token stops
 * working even before it expires, and removes both cookies.
 */

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};

use crate::backend::auth::cookies::clear_session;
use crate::backend::error::BackendResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

pub async fn logout(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    jar: CookieJar,
) -> BackendResult<(CookieJar, Json<Value>)> {
    state.users.set_refresh_token(user.id, None).await?;
    tracing::info!("User logged out: {}", user.username);

    Ok((clear_session(jar, state.config.cookie_secure), Json(json!({}))))
}
