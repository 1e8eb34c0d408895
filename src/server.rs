//! HTTP surface: landing page, health check and comment analysis.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::{info, warn};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeFile};

use crate::error::AnalyzeError;
use crate::youtube::CommentFetcher;
use crate::{AnalysisRequest, CommentResult, extract_video_id};

/// Whether the comment source could be built at startup
pub enum Upstream {
    Ready(CommentFetcher),
    Unavailable(String),
}

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub upstream: Upstream,
    pub index_path: PathBuf,
}

impl AppState {
    pub fn is_configured(&self) -> bool {
        matches!(self.upstream, Upstream::Ready(_))
    }

    /// Run one analysis: resolve the video id, then page and classify comments
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Vec<CommentResult>, AnalyzeError> {
        let fetcher = match &self.upstream {
            Upstream::Ready(fetcher) => fetcher,
            Upstream::Unavailable(_) => return Err(AnalyzeError::not_initialized()),
        };

        let video_id = extract_video_id(&request.url).ok_or(AnalyzeError::InvalidUrl)?;
        info!("Analyzing comments for {video_id} (limit {})", request.limit);

        fetcher.fetch(&video_id, request.limit).await
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub youtube_api_configured: bool,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    detail: String,
}

impl From<AnalyzeError> for ApiError {
    fn from(err: AnalyzeError) -> Self {
        let status = match err {
            AnalyzeError::InvalidUrl => StatusCode::BAD_REQUEST,
            AnalyzeError::NoComments => StatusCode::NOT_FOUND,
            AnalyzeError::Configuration(_) | AnalyzeError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// Build the application router with permissive CORS
pub fn router(state: AppState) -> Router {
    let index = ServeFile::new(&state.index_path);

    Router::new()
        .route_service("/", index)
        .route("/health", get(health))
        .route("/analyze_comments/", post(analyze_comments))
        .route("/analyze_comments", post(analyze_comments))
        .layer(CorsLayer::very_permissive())
        .with_state(Arc::new(state))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "Running",
        youtube_api_configured: state.is_configured(),
    })
}

async fn analyze_comments(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<CommentResult>>> {
    let Json(request) = body.inspect_err(|e| warn!("Rejected analyze request body: {}", e.body_text()))?;
    match state.analyze(&request).await {
        Ok(comments) => {
            info!("Returning {} classified comments", comments.len());
            Ok(Json(comments))
        }
        Err(e) => {
            warn!("Analysis of {:?} failed: {e}", request.url);
            Err(e.into())
        }
    }
}
