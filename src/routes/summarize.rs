use axum::{extract::State, Extension, Json};
use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{SummaryRequest, SummaryResponse},
    services::summarize,
    state::AppState,
};

/// Handler for review summary endpoint
///
/// A missing title is rejected with 400. Once a title is present the answer is
/// always 200: generation failures come back as the degraded message.
pub async fn summarize(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SummaryRequest>,
) -> AppResult<Json<SummaryResponse>> {
    if request.game.trim().is_empty() {
        return Err(AppError::InvalidInput("Game title required".to_string()));
    }

    tracing::info!(
        request_id = %request_id,
        game = %request.game,
        reviews = request.reviews.len(),
        "Processing summary request"
    );

    let outcome = summarize::summarize(
        &request.game,
        &request.reviews,
        state.summaries.as_ref(),
        state.generator.as_ref(),
        Utc::now(),
    )
    .await;

    Ok(Json(SummaryResponse {
        summary: outcome.into_text(),
    }))
}
