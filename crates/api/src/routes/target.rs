use axum::routing::put;
use axum::Router;

use crate::handlers::target;
use crate::state::AppState;

/// Routes mounted at `/targets`.
///
/// ```text
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", put(target::update).delete(target::delete))
}
