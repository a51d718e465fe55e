//! Health endpoints
//!
//! - `GET /health` plain-text liveness
//! - `GET /health/live` liveness with the build version
//! - `GET /health/ready` pings the store; 503 when it is down or slow

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::store::Store;

/// Longest a readiness ping may take before the store counts as down
const READINESS_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone)]
pub struct HealthState {
    pub store: Arc<dyn Store>,
}

impl HealthState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct Liveness {
    status: &'static str,
    version: &'static str,
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        status: "alive",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
struct Readiness {
    status: &'static str,
    store: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

async fn readiness(State(state): State<HealthState>) -> (StatusCode, Json<Readiness>) {
    let started = Instant::now();
    let outcome = tokio::time::timeout(READINESS_TIMEOUT, state.store.ping()).await;

    match outcome {
        Ok(Ok(())) => (
            StatusCode::OK,
            Json(Readiness {
                status: "ready",
                store: "ok",
                latency_ms: Some(started.elapsed().as_millis() as u64),
            }),
        ),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Readiness ping failed");
            unavailable("error")
        }
        Err(_) => {
            tracing::error!(timeout = ?READINESS_TIMEOUT, "Readiness ping timed out");
            unavailable("timeout")
        }
    }
}

fn unavailable(store: &'static str) -> (StatusCode, Json<Readiness>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(Readiness {
            status: "unavailable",
            store,
            latency_ms: None,
        }),
    )
}
