use axum::Json;

use crate::shared::{all_jokes, Joke};

/// `GET /`
pub async fn hello() -> &'static str {
    "Hello World!"
}

/// `GET /api/jokes`
pub async fn list_jokes() -> Json<Vec<Joke>> {
    Json(all_jokes())
}
