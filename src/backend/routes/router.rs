/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router and applies the
 * cross-cutting layers.
 *
 * # Layers (outermost first)
 *
 * 1. CORS: `CORS_ORIGIN` if set, otherwise the request origin is mirrored;
 *    credentials are allowed so the session cookies travel
 * 2. Request tracing
 * 3. JSON body limit (upload routes raise their own)
 */

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::jokes::hello;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::user_routes::{configure_user_routes, USER_ROUTES_PREFIX};
use crate::backend::server::state::AppState;

pub const JSON_BODY_LIMIT: usize = 16 * 1024;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(app_state.config.cors_origin.as_deref());
    let static_files = ServeDir::new(&app_state.config.public_dir);

    let router = Router::new().route("/", get(hello));
    let router = configure_api_routes(router)
        .nest(USER_ROUTES_PREFIX, configure_user_routes(app_state.clone()))
        .nest_service("/static", static_files)
        .fallback(not_found);

    router
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => AllowOrigin::exact(origin),
        Some(Err(e)) => {
            tracing::warn!("Ignoring invalid CORS_ORIGIN: {}", e);
            AllowOrigin::mirror_request()
        }
        None => AllowOrigin::mirror_request(),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

async fn not_found() -> BackendError {
    BackendError::not_found("Route not found")
}
