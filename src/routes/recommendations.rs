use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{RecommendationRequest, RecommendationResponse},
    services::recommendations,
    state::AppState,
};

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(
        request_id = %request_id,
        user_id = ?request.user_id,
        "Processing recommendation request"
    );

    let recommendations = recommendations::get_recommendations(
        state.catalog.as_ref(),
        state.vectorizer.as_ref(),
        request.user_id,
    )
    .await?;

    Ok(Json(RecommendationResponse { recommendations }))
}
