/**
 * User Service Routes
 *
 * Nested under `/api/v1/users`.
 *
 * ## Public
 * - `POST /register` (multipart)
 * - `POST /login`
 * - `POST /refresh-token`
 *
 * ## Session required
 * - `POST /logout`
 * - `POST /change-password`
 * - `GET /current-user`
 * - `PATCH /update-account`
 * - `POST /avatar-new` (multipart)
 * - `POST /cover-new` (multipart)
 *
 * Multipart routes accept bodies up to `UPLOAD_LIMIT_BYTES`; everything
 * else keeps the router-wide JSON limit.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};

use crate::backend::auth::handlers::{
    change_password, current_user, login, logout, refresh_access_token, register,
    update_account, update_avatar, update_cover_image,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;

pub const USER_ROUTES_PREFIX: &str = "/api/v1/users";

/// Build the user service router
pub fn configure_user_routes(state: AppState) -> Router<AppState> {
    let upload_limit = DefaultBodyLimit::max(state.config.upload_limit_bytes);

    let public = Router::new()
        .route("/register", post(register).layer(upload_limit))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_access_token));

    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/change-password", post(change_password))
        .route("/current-user", get(current_user))
        .route("/update-account", patch(update_account))
        .route("/avatar-new", post(update_avatar).layer(upload_limit))
        .route("/cover-new", post(update_cover_image).layer(upload_limit))
        .route_layer(from_fn_with_state(state, auth_middleware));

    public.merge(protected)
}
