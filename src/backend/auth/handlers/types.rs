/**
 * User Handler Types
 *
 * Request and response bodies of the user endpoints, plus the `ApiJson`
 * extractor that reports malformed JSON in the common error format.
 *
 * Request fields are all optional at the serde level so that a missing
 * field produces the endpoint's own 400 message instead of a generic
 * deserialization error.
 */

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend::auth::handlers::form::UploadForm;
use crate::backend::auth::users::PublicUser;
use crate::backend::error::BackendError;
use crate::shared::error::{non_blank, require, SharedError};

/// JSON body extractor whose rejection is a `BackendError`
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!("Rejected JSON body: {}", rejection.body_text());
            BackendError::bad_request(rejection.body_text())
        })?;
        Ok(Self(value))
    }
}

const ALL_FIELDS_REQUIRED: &str = "All fields are required";

/// Text fields of the registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl RegisterRequest {
    pub fn from_form(form: &UploadForm) -> Result<Self, SharedError> {
        let password = form.text("password");
        if non_blank(password).is_none() {
            return Err(SharedError::validation("password", ALL_FIELDS_REQUIRED));
        }
        Ok(Self {
            username: require("username", form.text("username"), ALL_FIELDS_REQUIRED)?,
            email: require("email", form.text("email"), ALL_FIELDS_REQUIRED)?,
            password: password.unwrap_or_default().to_string(),
            full_name: require("fullName", form.text("fullName"), ALL_FIELDS_REQUIRED)?,
        })
    }
}

/// Login request
///
/// Either `username` or `email` identifies the account.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login response: the user plus both tokens (also set as cookies)
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: PublicUser,
    pub access_token: String,
    pub refresh_token: String,
}

/// Refresh request body, used when the refresh cookie is absent
#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}
