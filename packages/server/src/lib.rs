//! LexiDraft HTTP adapter.
//!
//! A thin layer over [`FeatureDispatcher`]: one generic route runs any of
//! the five actions, and exported documents are served for download.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lexidraft::{
    CompletionClient, FeatureDispatcher, FeatureKind, FeatureOutput, Field, LexidraftError,
};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared handler state.
pub struct AppState<C: CompletionClient> {
    pub dispatcher: Arc<FeatureDispatcher<C>>,
}

impl<C: CompletionClient> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

/// Request body for `POST /api/features/{kind}`.
#[derive(Debug, Default, Deserialize)]
pub struct FeatureRequest {
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureResponse {
    pub kind: FeatureKind,
    pub text: String,
    pub file: String,
    pub download_url: String,
    pub success: bool,
}

impl From<FeatureOutput> for FeatureResponse {
    fn from(output: FeatureOutput) -> Self {
        let filename = output.kind.export_filename();
        Self {
            kind: output.kind,
            text: output.text,
            file: output.path.display().to_string(),
            download_url: format!("/outputs/{filename}"),
            success: output.success,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeatureDescriptor {
    pub kind: FeatureKind,
    pub label: String,
    pub fields: Vec<String>,
    pub filename: String,
}

/// Handler error, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(LexidraftError);

impl From<LexidraftError> for ApiError {
    fn from(e: LexidraftError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            LexidraftError::UnknownFeature(_) => StatusCode::NOT_FOUND,
            e if e.is_completion_failure() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "feature request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

/// Build the application router.
pub fn router<C: CompletionClient + 'static>(dispatcher: Arc<FeatureDispatcher<C>>) -> Router {
    let output_dir = dispatcher.exporter().output_dir().to_path_buf();
    let state = AppState { dispatcher };

    Router::new()
        .route("/health", get(health))
        .route("/api/features", get(list_features))
        .route("/api/features/{kind}", post(run_feature::<C>))
        .with_state(state)
        .nest_service("/outputs", ServeDir::new(output_dir))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn list_features() -> Json<Vec<FeatureDescriptor>> {
    let features = FeatureKind::all()
        .map(|kind| FeatureDescriptor {
            kind,
            label: kind.label().to_string(),
            fields: kind.field_names().iter().map(|f| f.to_string()).collect(),
            filename: kind.export_filename().to_string(),
        })
        .collect();
    Json(features)
}

async fn run_feature<C: CompletionClient + 'static>(
    State(state): State<AppState<C>>,
    Path(kind): Path<String>,
    request: Option<Json<FeatureRequest>>,
) -> Result<Json<FeatureResponse>, ApiError> {
    let kind = FeatureKind::parse(&kind)?;
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let fields: Vec<Field> = request
        .fields
        .into_iter()
        .map(|(name, value)| Field::new(name, value))
        .collect();

    // The completion call blocks until the upstream service answers.
    let dispatcher = Arc::clone(&state.dispatcher);
    let output = tokio::task::spawn_blocking(move || dispatcher.run(kind, &fields))
        .await
        .map_err(|e| {
            LexidraftError::Io(std::io::Error::other(format!("feature task failed: {e}")))
        })??;

    Ok(Json(output.into()))
}
