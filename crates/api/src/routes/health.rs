//! Liveness and database reachability at `GET /health`.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    Degraded,
}

/// Outcome of the database round trip.
#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub reachable: bool,
    pub latency_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub database: DatabaseCheck,
}

/// GET /health
///
/// Answers 503 while the database is unreachable so a load balancer can
/// drain the instance.
async fn report(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let started = Instant::now();
    let reachable = match spycat_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let database = DatabaseCheck {
        reachable,
        latency_ms: started.elapsed().as_millis() as u64,
    };

    let (code, status) = if reachable {
        (StatusCode::OK, ServiceStatus::Ok)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, ServiceStatus::Degraded)
    };

    (
        code,
        Json(HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

/// Routes mounted at the root, outside the resource routers.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
