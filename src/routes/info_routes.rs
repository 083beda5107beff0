use axum::{
    routing::get,
    Router,
    response::{IntoResponse, Response},
    Json,
    extract::State,
};

use serde::Serialize;
use tracing::debug;

use crate::state::mock_state::MockState;

#[derive(Serialize)]
pub struct HealthStatus {
    status: String,
    recordings: Vec<String>,
}

pub fn health_routes(state: MockState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(state)
}

async fn health_check(State(state): State<MockState>) -> Response {
    let mut recordings: Vec<String> = state.recordings.read().await.keys().cloned().collect();
    recordings.sort();

    debug!("Health check, {} recordings", recordings.len());

    Json(HealthStatus {
        status: "ok".to_owned(),
        recordings,
    })
    .into_response()
}
