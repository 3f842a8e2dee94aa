/**
 * Current User Handler
 *
 * `GET /api/v1/users/current-user` (session required)
 */

use axum::Json;

use crate::backend::auth::users::PublicUser;
use crate::backend::middleware::AuthUser;

/// Return the user loaded by the session middleware
pub async fn current_user(AuthUser(user): AuthUser) -> Json<PublicUser> {
    Json(user)
}
