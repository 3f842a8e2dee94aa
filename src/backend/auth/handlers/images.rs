/**
 * Avatar and Cover Image Handlers
 *
 * `POST /api/v1/users/avatar-new` and `POST /api/v1/users/cover-new`
 * (session required, multipart with one file field)
 *
 * The new file is uploaded first and its URL stored on the user. If storing
 * fails, the upload is deleted again.
 */

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};

use crate::backend::auth::handlers::form::UploadForm;
use crate::backend::auth::handlers::register::{AVATAR_FIELD, COVER_FIELD};
use crate::backend::auth::users::PublicUser;
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::media::discard;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageKind {
    Avatar,
    Cover,
}

impl ImageKind {
    fn field(self) -> &'static str {
        match self {
            ImageKind::Avatar => AVATAR_FIELD,
            ImageKind::Cover => COVER_FIELD,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ImageKind::Avatar => "avatar",
            ImageKind::Cover => "cover image",
        }
    }
}

pub async fn update_avatar(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> BackendResult<Json<PublicUser>> {
    replace_image(&state, user, multipart, ImageKind::Avatar).await
}

pub async fn update_cover_image(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> BackendResult<Json<PublicUser>> {
    replace_image(&state, user, multipart, ImageKind::Cover).await
}

async fn replace_image(
    state: &AppState,
    user: PublicUser,
    multipart: Result<Multipart, MultipartRejection>,
    kind: ImageKind,
) -> BackendResult<Json<PublicUser>> {
    let mut form = UploadForm::read(multipart, &state.config.upload_temp_dir, &[kind.field()]).await?;
    let file = form.take_file(kind.field()).ok_or_else(|| {
        BackendError::bad_request(format!("{} file is missing", capitalize(kind.label())))
    })?;

    let media = state.media.upload(file.path()).await.map_err(|e| {
        tracing::error!("Failed to upload {} for {}: {:?}", kind.label(), user.username, e);
        BackendError::internal(format!("Error while uploading {}", kind.label()))
    })?;

    let stored = match kind {
        ImageKind::Avatar => state.users.update_avatar(user.id, &media.url).await,
        ImageKind::Cover => state.users.update_cover_image(user.id, &media.url).await,
    };

    match stored {
        Ok(updated) => {
            tracing::info!("Updated {} for user: {}", kind.label(), updated.username);
            Ok(Json(PublicUser::from(updated)))
        }
        Err(e) => {
            discard(state.media.as_ref(), &media).await;
            Err(e.into())
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
