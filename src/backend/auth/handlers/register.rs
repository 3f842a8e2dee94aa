/**
 * Register Handler
 *
 * `POST /api/v1/users/register` (multipart)
 *
 * # Registration Process
 *
 * 1. Require `username`, `email`, `password`, `fullName`
 * 2. Reject when the username or email is taken
 * 3. Require an `avatar` file; `coverImage` is optional
 * 4. Hash the password
 * 5. Upload the avatar (failure aborts) and the cover (failure is logged)
 * 6. Create the user; if that fails, delete the uploaded media again
 *
 * Registration does not start a session; the client logs in afterwards.
 */

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};

use crate::backend::auth::handlers::form::UploadForm;
use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::password::hash_password;
use crate::backend::auth::users::{normalize_email, normalize_username, NewUser, PublicUser};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::media::{discard, UploadedMedia};
use crate::backend::server::state::AppState;

pub const AVATAR_FIELD: &str = "avatar";
pub const COVER_FIELD: &str = "coverImage";

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - missing field or missing avatar
/// * `409 Conflict` - username or email already registered
/// * `500 Internal Server Error` - avatar upload, hashing or persistence failed
pub async fn register(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> BackendResult<(StatusCode, Json<PublicUser>)> {
    let mut form = UploadForm::read(
        multipart,
        &state.config.upload_temp_dir,
        &[AVATAR_FIELD, COVER_FIELD],
    )
    .await?;

    let request = RegisterRequest::from_form(&form)?;
    tracing::info!("Register request for: {}", request.username);

    let username = normalize_username(&request.username);
    let email = normalize_email(&request.email);
    if state
        .users
        .find_by_username_or_email(Some(&username), Some(&email))
        .await?
        .is_some()
    {
        tracing::warn!("Registration conflict for {} / {}", username, email);
        return Err(BackendError::conflict(
            "User with email or username already exists",
        ));
    }

    let avatar_file = form
        .take_file(AVATAR_FIELD)
        .ok_or_else(|| BackendError::bad_request("Avatar is required"))?;
    let cover_file = form.take_file(COVER_FIELD);

    let password_hash = hash_password(&request.password, state.config.bcrypt_cost).await?;

    let avatar = state.media.upload(avatar_file.path()).await.map_err(|e| {
        tracing::error!("Avatar upload failed: {:?}", e);
        BackendError::internal("Avatar upload failed")
    })?;

    let cover = match &cover_file {
        Some(file) => match state.media.upload(file.path()).await {
            Ok(media) => Some(media),
            Err(e) => {
                tracing::warn!("Cover image upload failed, continuing without: {:?}", e);
                None
            }
        },
        None => None,
    };

    let new_user = NewUser::new(
        &username,
        &email,
        &request.full_name,
        avatar.url.clone(),
        cover.as_ref().map(|c| c.url.clone()),
        password_hash,
    );

    match state.users.create_user(new_user).await {
        Ok(user) => {
            tracing::info!("User registered: {} ({})", user.username, user.id);
            Ok((StatusCode::CREATED, Json(PublicUser::from(user))))
        }
        Err(e) => {
            tracing::error!("Failed to create user {}: {:?}", username, e);
            let uploaded: Vec<&UploadedMedia> = std::iter::once(&avatar).chain(cover.as_ref()).collect();
            for media in uploaded {
                discard(state.media.as_ref(), media).await;
            }
            Err(e.into())
        }
    }
}
