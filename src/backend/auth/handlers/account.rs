/**
 * Update Account Handler
 *
 * `PATCH /api/v1/users/update-account` (session required)
 *
 * Updates the display name and/or email. Blank fields are ignored; at least
 * one non-blank field is required. A taken email is a 409.
 */

use axum::{extract::State, Json};

use crate::backend::auth::handlers::types::{ApiJson, UpdateAccountRequest};
use crate::backend::auth::users::{normalize_email, AccountUpdate, PublicUser};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::error::non_blank;

pub async fn update_account(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<UpdateAccountRequest>,
) -> BackendResult<Json<PublicUser>> {
    let update = AccountUpdate {
        full_name: non_blank(request.full_name.as_deref()).map(str::to_string),
        email: non_blank(request.email.as_deref()).map(normalize_email),
    };
    if update.is_empty() {
        return Err(BackendError::bad_request(
            "At least one of fullName or email is required",
        ));
    }

    let updated = state.users.update_account(user.id, update).await?;
    tracing::info!("Account details updated for user: {}", updated.username);

    Ok(Json(PublicUser::from(updated)))
}
