use axum::{
    routing::{get, post},
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
    extract::{Path, State},
};

use serde::Serialize;
use tracing::{info, debug, error};

use crate::core::constants::MAX_SERVED_SAMPLES;
use crate::core::format::{AnnotationResource, SignalsPayload, UpdateResponse};
use crate::state::mock_state::MockState;

#[derive(Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// =======================
/// ROUTER
/// =======================

pub fn mock_routes(state: MockState) -> Router {
    Router::new()
        .route("/get-signals/{key}", get(get_signals))
        .route("/get-annotations/{key}", get(get_annotations))
        .route("/update-annotations/{key}", post(update_annotations))
        .with_state(state)
}

fn not_found(key: &str) -> Response {
    error!("Recording not found: {}", key);
    (
        StatusCode::NOT_FOUND,
        Json(ErrorDetail {
            detail: format!("Recording {} not found", key),
        }),
    )
        .into_response()
}

/// =======================
/// HANDLERS
/// =======================

async fn get_signals(
    State(state): State<MockState>,
    Path(key): Path<String>,
) -> Response {
    debug!("Signals requested: {}", key);

    let recordings = state.recordings.read().await;
    let Some(recording) = recordings.get(&key) else {
        return not_found(&key);
    };

    let signals = recording
        .signals
        .signals
        .iter()
        .map(|(channel, values)| {
            let served = values.len().min(MAX_SERVED_SAMPLES);
            (channel.clone(), values[..served].to_vec())
        })
        .collect();

    Json(SignalsPayload {
        signals,
        labels: recording.signals.labels.clone(),
    })
    .into_response()
}

async fn get_annotations(
    State(state): State<MockState>,
    Path(key): Path<String>,
) -> Response {
    debug!("Annotations requested: {}", key);

    let recordings = state.recordings.read().await;
    match recordings.get(&key) {
        Some(recording) => Json(recording.annotations.clone()).into_response(),
        None => not_found(&key),
    }
}

async fn update_annotations(
    State(state): State<MockState>,
    Path(key): Path<String>,
    Json(annotations): Json<AnnotationResource>,
) -> Response {
    let mut recordings = state.recordings.write().await;
    let Some(recording) = recordings.get_mut(&key) else {
        return not_found(&key);
    };

    info!(
        "Annotations updated for {}: {} ranges",
        key,
        annotations.range_count()
    );
    recording.annotations = annotations;

    Json(UpdateResponse {
        message: format!("Annotations for {} updated", key),
    })
    .into_response()
}
