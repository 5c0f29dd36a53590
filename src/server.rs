use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::get,
};
use eyre::Result;
use log::{debug, info, warn};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::VideoMetadata;
use crate::metadata::{self, MetadataAugmenter};
use crate::youtube::TranscriptProvider;

/// Shared per-process state; requests share nothing mutable
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn TranscriptProvider>,
    pub augmenter: Arc<dyn MetadataAugmenter>,
}

/// The one JSON shape every /transcript response uses: either transcript
/// plus metadata, or an error string, never both.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VideoMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranscriptResponse {
    pub fn succeeded(transcript: String, metadata: VideoMetadata) -> Self {
        Self {
            success: true,
            transcript: Some(transcript),
            metadata: Some(metadata),
            error: None,
        }
    }

    pub fn failed(error: String) -> Self {
        Self {
            success: false,
            transcript: None,
            metadata: None,
            error: Some(error),
        }
    }
}

/// Build the application router. CORS is wide open so browser and app
/// clients can call the gateway directly.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/transcript/:video_id", get(transcript_handler))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(cors))
}

/// Bind and serve until the process is stopped
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(format!("{host}:{port}")).await?;
    info!("Listening on http://{host}:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn home_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "YouTube Transcript API",
        "endpoints": {
            "/transcript/{video_id}": "GET - Fetch transcript for a video",
            "/health": "GET - Health check"
        }
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({"status": "healthy"}))
}

async fn transcript_handler(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> impl IntoResponse {
    info!("Transcript request for video {video_id}");

    match run_pipeline(&state, &video_id).await {
        Ok(resp) => (StatusCode::OK, Json(resp)).into_response(),
        Err(e) => {
            warn!("Transcript request for {video_id} failed: {e}");
            (StatusCode::BAD_REQUEST, Json(TranscriptResponse::failed(e.to_string()))).into_response()
        }
    }
}

/// Retrieve the transcript, then resolve metadata. A retrieval failure fails
/// the whole request; metadata scraping can only degrade to placeholders.
async fn run_pipeline(state: &AppState, video_id: &str) -> Result<TranscriptResponse> {
    let transcript = state.provider.fetch(video_id).await?;
    debug!(
        "Fetched transcript for {video_id}: lang={} chars={}",
        transcript.track.language_code,
        transcript.text.len()
    );

    let fields = state.augmenter.augment(video_id).await;
    let meta = metadata::resolve(video_id, &transcript.track, fields);

    Ok(TranscriptResponse::succeeded(transcript.text, meta))
}
