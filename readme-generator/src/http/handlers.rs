//! Route handlers.

use super::{ApiError, AppState};
use crate::generator::GenerationRequest;
use crate::summary::{GeneratedDocument, RepositorySummary};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/analyze`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// URL of the repository to analyze.
    #[serde(default, alias = "repoUrl")]
    pub repository_url: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

pub(crate) async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<RepositorySummary>, ApiError> {
    let Json(request) = body?;
    let url = request.repository_url.unwrap_or_default();
    let summary = state.analyzer().analyze(&url).await?;
    Ok(Json(summary))
}

pub(crate) async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GeneratedDocument>, ApiError> {
    let Json(request) = body?;
    let document = state.generator().generate(request).await?;
    Ok(Json(document))
}

pub(crate) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
