/**
 * Change Password Handler
 *
 * `POST /api/v1/users/change-password` (session required)
 *
 * The old password must verify before the new hash is stored. Existing
 * sessions are left untouched.
 */

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::backend::auth::handlers::types::{ApiJson, ChangePasswordRequest};
use crate::backend::auth::password::{hash_password, verify_password};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<ChangePasswordRequest>,
) -> BackendResult<Json<Value>> {
    let (Some(old_password), Some(new_password)) = (
        request.old_password.filter(|p| !p.is_empty()),
        request.new_password.filter(|p| !p.trim().is_empty()),
    ) else {
        return Err(BackendError::bad_request("Old and new password are required"));
    };

    let stored = state
        .users
        .get_user_by_id(user.id)
        .await?
        .ok_or_else(|| BackendError::not_found("User does not exist"))?;

    if !verify_password(&old_password, &stored.password_hash).await? {
        tracing::warn!("Wrong old password for user: {}", user.username);
        return Err(BackendError::bad_request("Invalid old password"));
    }

    let password_hash = hash_password(&new_password, state.config.bcrypt_cost).await?;
    state.users.update_password(user.id, &password_hash).await?;

    tracing::info!("Password changed for user: {}", user.username);
    Ok(Json(json!({})))
}
