/**
 * API Route Handlers
 *
 * ## Jokes
 * - `GET /api/jokes` - static joke list
 */

use axum::{routing::get, Router};

use crate::backend::jokes::list_jokes;
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/api/jokes", get(list_jokes))
}
