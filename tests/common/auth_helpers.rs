//! Authentication test helpers
//!
//! Register and log in through the HTTP surface, and forge tokens signed
//! with the test secrets.

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestResponse;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use uuid::Uuid;
use videotube::backend::auth::sessions::AccessClaims;

use super::{TestApp, ACCESS_SECRET};

pub const PASSWORD: &str = "password123";
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image";

/// Credentials of a logged in test user
#[derive(Debug, Clone)]
pub struct TestSession {
    pub user: Value,
    pub access_token: String,
    pub refresh_token: String,
}

impl TestSession {
    pub fn id(&self) -> &str {
        self.user["id"].as_str().expect("user id")
    }
}

pub fn image_part(name: &str, bytes: &[u8]) -> Part {
    Part::bytes(bytes.to_vec())
        .file_name(name.to_string())
        .mime_type("image/png")
}

/// Registration form with all text fields and an avatar
pub fn register_form(username: &str, email: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("username", username.to_string())
        .add_text("email", email.to_string())
        .add_text("password", PASSWORD)
        .add_text("fullName", format!("{} Test", username))
        .add_part("avatar", image_part("avatar.png", PNG_BYTES))
}

impl TestApp {
    pub async fn register(&self, username: &str, email: &str) -> TestResponse {
        self.server
            .post("/api/v1/users/register")
            .multipart(register_form(username, email))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.server
            .post("/api/v1/users/login")
            .json(&json!({ "username": username, "password": password }))
            .await
    }

    /// Register a user and log in, panicking on failure
    pub async fn signed_in(&self, username: &str) -> TestSession {
        let email = format!("{}@example.com", username);
        let registered = self.register(username, &email).await;
        assert_eq!(registered.status_code(), 201, "register: {}", registered.text());

        let response = self.login(username, PASSWORD).await;
        assert_eq!(response.status_code(), 200, "login: {}", response.text());
        let body: Value = response.json();

        TestSession {
            user: body["user"].clone(),
            access_token: body["accessToken"].as_str().expect("accessToken").to_string(),
            refresh_token: body["refreshToken"].as_str().expect("refreshToken").to_string(),
        }
    }
}

/// Access token signed with the test secret, already expired
pub fn expired_access_token(user_id: &str) -> String {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = AccessClaims {
        sub: user_id.to_string(),
        email: "expired@example.com".into(),
        username: "expired".into(),
        full_name: "Expired".into(),
        exp: now - 3600,
        iat: now - 7200,
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(ACCESS_SECRET.as_bytes()),
    )
    .expect("sign expired token")
}
