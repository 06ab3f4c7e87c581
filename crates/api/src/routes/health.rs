use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Service status reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Ok,
    /// Serving, but the database did not answer.
    Degraded,
}

/// Health payload. Carries `success: true` like every other envelope since
/// the web client checks that flag before reading anything else.
#[derive(Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: ServiceStatus,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthResponse {
    fn new(db_healthy: bool) -> Self {
        Self {
            success: true,
            status: if db_healthy {
                ServiceStatus::Ok
            } else {
                ServiceStatus::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match platewise_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    Json(HealthResponse::new(db_healthy))
}

/// Root-level health route, mounted outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_database_reports_degraded() {
        let json = serde_json::to_value(HealthResponse::new(false)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["db_healthy"], false);
    }
}
