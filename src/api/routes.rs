use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, pages, AppState};
use crate::middleware::{make_span_with_request_id, request_id_middleware, session_middleware};

/// Creates the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // HTML interface
        .route("/", get(pages::index))
        .route("/recommendations", post(pages::request_recommendations))
        .route("/details/original", post(pages::toggle_original_details))
        .route("/details/:movie_id", post(pages::toggle_recommendation_details))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(session_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// JSON API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(handlers::list_movies))
        .route("/recommendations", get(handlers::recommend))
        .layer(CorsLayer::permissive())
}
