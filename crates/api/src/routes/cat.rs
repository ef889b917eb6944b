use axum::routing::{get, put};
use axum::Router;

use crate::handlers::cat;
use crate::state::AppState;

/// Routes mounted at `/cats`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// DELETE /{id}            -> delete
/// PUT    /{id}/salary     -> update_salary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cat::list).post(cat::create))
        .route("/{id}", get(cat::get_by_id).delete(cat::delete))
        .route("/{id}/salary", put(cat::update_salary))
}
