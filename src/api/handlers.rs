use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{SearchResponse, Top100Response},
    services,
};

use super::{extract::QueryParams, AppState};

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub movie: String,
    /// Row id of a previously returned candidate; validated by the handler
    pub selection: Option<String>,
    pub order: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Top100Params {
    pub order: Option<String>,
    pub genre: Option<String>,
}

fn parse_selection(selection: Option<&str>) -> AppResult<Option<usize>> {
    selection
        .map(|s| {
            s.trim().parse::<usize>().map_err(|_| {
                AppError::Validation("Parameter 'selection' must be a non-negative integer.".to_string())
            })
        })
        .transpose()
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Resolve a title and list well-rated movies from its cluster
pub async fn search_movie(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    tracing::info!(
        request_id = %request_id,
        movie = %params.movie,
        selection = ?params.selection,
        "Processing search request"
    );

    let selection = parse_selection(params.selection.as_deref())?;

    let response = services::search(
        &state.catalog,
        &params.movie,
        selection,
        params.order.as_deref(),
        state.candidate_limit,
    )
    .inspect_err(|e| tracing::info!(request_id = %request_id, error = %e, "Search rejected"))?;

    Ok(Json(response))
}

/// Top 100 movies by score, optionally filtered by genre
pub async fn top100(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    QueryParams(params): QueryParams<Top100Params>,
) -> Json<Top100Response> {
    let response = services::top100(
        &state.catalog,
        params.order.as_deref(),
        params.genre.as_deref(),
    );

    tracing::info!(
        request_id = %request_id,
        genre = %response.genre,
        returned = response.movies.len(),
        "Top 100 served"
    );

    Json(response)
}
