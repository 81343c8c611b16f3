//! Health-check subsystem.
//!
//! The gateway defers the `/q/health` path prefix here instead of handling
//! it itself; this router owns its own status codes and is the one surface
//! that answers something other than 202. Intended for load balancers and
//! orchestration liveness/readiness probes.

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

/// Builds the router the gateway nests under the health path prefix.
pub fn health_router() -> Router {
    Router::new()
        .route("/live", get(live_handler))
        .route("/ready", get(ready_handler))
}

/// Liveness probe: 200 as long as the process is serving requests.
pub async fn live_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

/// Readiness probe.
///
/// The gateway keeps no connections or caches to warm up, so readiness is
/// equivalent to liveness.
pub async fn ready_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn live_returns_200_ok() {
        let (status, body) = live_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn ready_returns_200_ok() {
        let (status, body) = ready_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
