/**
 * Login Handler
 *
 * `POST /api/v1/users/login`
 *
 * # Authentication Process
 *
 * 1. Look up the user by username or email
 * 2. Verify password using bcrypt
 * 3. Issue an access/refresh pair and store the refresh token
 * 4. Set both tokens as cookies and return them with the user
 *
 * An unknown account is 404 and a wrong password is 401.
 */

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::auth::cookies::with_session;
use crate::backend::auth::handlers::types::{ApiJson, LoginRequest, LoginResponse};
use crate::backend::auth::password::verify_password;
use crate::backend::auth::sessions::generate_access_and_refresh_tokens;
use crate::backend::auth::users::{normalize_email, normalize_username, PublicUser};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;
use crate::shared::error::non_blank;

/// Login handler
///
/// # Example Request
///
/// ```http
/// POST /api/v1/users/login HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "alice", "password": "secret"}
/// ```
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(request): ApiJson<LoginRequest>,
) -> BackendResult<(CookieJar, Json<LoginResponse>)> {
    let username = non_blank(request.username.as_deref()).map(normalize_username);
    let email = non_blank(request.email.as_deref()).map(normalize_email);
    if username.is_none() && email.is_none() {
        return Err(BackendError::bad_request("username or email is required"));
    }
    let password = request
        .password
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| BackendError::bad_request("Password is required"))?;

    let identity = username.as_deref().or(email.as_deref()).unwrap_or_default();
    tracing::info!("Login request for: {}", identity);

    let user = state
        .users
        .find_by_username_or_email(username.as_deref(), email.as_deref())
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", identity);
            BackendError::not_found("User does not exist")
        })?;

    if !verify_password(password, &user.password_hash).await? {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(BackendError::unauthorized("Invalid user credentials"));
    }

    let pair = generate_access_and_refresh_tokens(state.users.as_ref(), &state.tokens, user.id).await?;
    let jar = with_session(jar, &pair, state.config.cookie_secure);

    tracing::info!("User logged in successfully: {} ({})", user.username, user.email);

    Ok((
        jar,
        Json(LoginResponse {
            user: PublicUser::from(user),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }),
    ))
}
