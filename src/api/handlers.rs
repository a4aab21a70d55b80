use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        Movie, MovieMetadata, MovieSummary, Recommendation, DEFAULT_RECOMMENDATIONS,
        MAX_RECOMMENDATIONS,
    },
    services::recommendations,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    /// Selected movie and its metadata; absent when the title is unknown
    pub input: Option<InputMovie>,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct InputMovie {
    #[serde(flatten)]
    pub movie: Movie,
    pub metadata: MovieMetadata,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// All movies in table order
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
    Json(state.store.summaries())
}

/// Enriched recommendations for one title
///
/// An unknown title is not an error: it yields an empty list.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let count = query.count.unwrap_or(DEFAULT_RECOMMENDATIONS);
    if count > MAX_RECOMMENDATIONS {
        return Err(AppError::InvalidInput(format!(
            "count must be at most {}",
            MAX_RECOMMENDATIONS
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        count,
        "Processing recommendation request"
    );

    let set = recommendations::get_recommendations(
        &state.store,
        state.provider.as_ref(),
        &query.title,
        count,
    )
    .await;

    let response = match set {
        Some(set) => RecommendationResponse {
            title: query.title,
            input: Some(InputMovie {
                movie: set.input,
                metadata: set.input_metadata,
            }),
            recommendations: set.recommendations,
        },
        None => RecommendationResponse {
            title: query.title,
            input: None,
            recommendations: Vec::new(),
        },
    };

    Ok(Json(response))
}
