pub mod cat;
pub mod health;
pub mod mission;
pub mod target;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cats                                            list, create
/// /cats/{id}                                       get, delete
/// /cats/{id}/salary                                update salary (PUT)
///
/// /missions                                        list, create
/// /missions/{id}                                   get, update, delete
/// /missions/{id}/cat/{cat_id}                      assign cat (POST)
/// /missions/{id}/targets                           add targets (POST)
///
/// /targets/{id}                                    update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cats", cat::router())
        .nest("/missions", mission::router())
        .nest("/targets", target::router())
}
