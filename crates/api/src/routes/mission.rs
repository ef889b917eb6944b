use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mission;
use crate::state::AppState;

/// Routes mounted at `/missions`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
/// POST   /{id}/cat/{cat_id}     -> assign_cat
/// POST   /{id}/targets          -> add_targets
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(mission::list).post(mission::create))
        .route(
            "/{id}",
            get(mission::get_by_id)
                .put(mission::update)
                .delete(mission::delete),
        )
        .route("/{id}/cat/{cat_id}", post(mission::assign_cat))
        .route("/{id}/targets", post(mission::add_targets))
}
