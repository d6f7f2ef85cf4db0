//! Liveness check. Unauthenticated.

use axum::Json;
use serde::Serialize;

use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: Timestamp,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Timestamp::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let Json(body) = health().await;
        let json = serde_json::to_value(body).unwrap();
        assert_eq!(json["status"], "OK");
        assert!(json["timestamp"].is_string());
    }
}
