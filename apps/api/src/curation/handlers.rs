//! Axum route handlers for the Curation API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::curation::pipeline::generate_curation;
use crate::curation::progress::TracingProgress;
use crate::curation::result::{CuratedCourse, CurationResult, CurationSummary};
use crate::errors::AppError;
use crate::state::AppState;
use crate::taxonomy::load_taxonomy;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CurationRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct CurationResponse {
    pub curation_id: Uuid,
    pub query: String,
    pub generated_at: DateTime<Utc>,
    pub clusters: Vec<String>,
    pub courses: Vec<CuratedCourse>,
    pub summary: CurationSummary,
    pub tokens_used: u64,
}

impl CurationResponse {
    fn new(query: String, result: CurationResult) -> Self {
        let summary = result.summary();
        Self {
            curation_id: Uuid::new_v4(),
            query,
            generated_at: Utc::now(),
            clusters: result.clusters,
            courses: result.courses,
            summary,
            tokens_used: result.tokens_used,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/curations
///
/// Loads a fresh taxonomy snapshot and runs the full curation for the query.
pub async fn handle_create_curation(
    State(state): State<AppState>,
    Json(request): Json<CurationRequest>,
) -> Result<Json<CurationResponse>, AppError> {
    let query = validate_query(request.query)?;
    let result = run_curation(&state, &query).await?;
    Ok(Json(CurationResponse::new(query, result)))
}

/// POST /api/v1/curations/export
///
/// Same pipeline, returned as a CSV download: catalog columns plus one True/False
/// column per cluster.
pub async fn handle_export_curation(
    State(state): State<AppState>,
    Json(request): Json<CurationRequest>,
) -> Result<Response, AppError> {
    let query = validate_query(request.query)?;
    let result = run_curation(&state, &query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"results.csv\"",
            ),
        ],
        result.to_csv(),
    )
        .into_response())
}

fn validate_query(query: String) -> Result<String, AppError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

async fn run_curation(state: &AppState, query: &str) -> Result<CurationResult, AppError> {
    let taxonomy = load_taxonomy(state.taxonomy.as_ref(), &TracingProgress).await?;
    generate_curation(
        query,
        &taxonomy,
        state.classifier.as_ref(),
        &state.config.curation,
        &TracingProgress,
    )
    .await
}
