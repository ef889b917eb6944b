use std::sync::Arc;

use spycat_core::cat::CatService;
use spycat_core::mission::MissionService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used by the health check.
    pub pool: spycat_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Cat operations.
    pub cats: CatService,
    /// Mission and target operations.
    pub missions: MissionService,
}
