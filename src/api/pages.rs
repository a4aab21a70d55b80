use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::SessionId,
    models::{MovieId, MAX_RECOMMENDATIONS, MIN_RECOMMENDATIONS},
    render::{render_page, PageContext},
    services::recommendations,
    session::SessionResults,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationForm {
    pub movie: String,
    pub count: usize,
}

/// Renders the page from the session's stored state
pub async fn index(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Html<String> {
    let session = state.sessions.snapshot(session_id.0).await;
    let ctx = PageContext {
        titles: state.store.titles(),
        image_base_url: &state.image_base_url,
        session: &session,
    };
    Html(render_page(&ctx))
}

/// "Get Recommendations": runs the lookup and stores the result in the session
pub async fn request_recommendations(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Form(form): Form<RecommendationForm>,
) -> AppResult<Redirect> {
    if !(MIN_RECOMMENDATIONS..=MAX_RECOMMENDATIONS).contains(&form.count) {
        return Err(AppError::InvalidInput(format!(
            "count must be between {} and {}",
            MIN_RECOMMENDATIONS, MAX_RECOMMENDATIONS
        )));
    }

    tracing::info!(
        session_id = %session_id,
        title = %form.movie,
        count = form.count,
        "Recommendations requested"
    );

    let set = recommendations::get_recommendations(
        &state.store,
        state.provider.as_ref(),
        &form.movie,
        form.count,
    )
    .await;

    let results = SessionResults {
        selected_title: form.movie,
        set,
    };
    state
        .sessions
        .store_results(session_id.0, results, form.count)
        .await;

    Ok(Redirect::to("/"))
}

/// Flips the detail panel of the selected movie
pub async fn toggle_original_details(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
) -> Redirect {
    let expanded = state.sessions.toggle_original_details(session_id.0).await;
    tracing::debug!(session_id = %session_id, expanded, "Toggled original movie details");
    Redirect::to("/#original")
}

/// Flips the detail panel of one recommended movie
pub async fn toggle_recommendation_details(
    State(state): State<AppState>,
    Extension(session_id): Extension<SessionId>,
    Path(movie_id): Path<u64>,
) -> AppResult<Redirect> {
    let movie_id = MovieId(movie_id);
    if state.store.find_by_id(movie_id).is_none() {
        return Err(AppError::NotFound(format!("movie {}", movie_id)));
    }

    let expanded = state.sessions.toggle_details(session_id.0, movie_id).await;
    tracing::debug!(
        session_id = %session_id,
        movie_id = %movie_id,
        expanded,
        "Toggled recommendation details"
    );
    Ok(Redirect::to(&format!("/#movie-{}", movie_id)))
}
