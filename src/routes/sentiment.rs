use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{SentimentRequest, SentimentResponse},
    services::sentiment,
    state::AppState,
};

/// Handler for review sentiment endpoint
pub async fn sentiment(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SentimentRequest>,
) -> AppResult<Json<SentimentResponse>> {
    tracing::info!(
        request_id = %request_id,
        game_id = ?request.game_id,
        "Processing sentiment request"
    );

    let response = sentiment::get_sentiment(
        state.catalog.as_ref(),
        state.analyzer.as_ref(),
        request.game_id,
    )
    .await?;

    Ok(Json(response))
}
