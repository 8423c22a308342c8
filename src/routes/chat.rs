use axum::{extract::State, Extension, Json};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{ChatRequest, ChatResponse},
    services::chat,
    state::AppState,
};

/// Handler for chat assistant endpoint
pub async fn chat(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    let reply = chat::reply(
        &state.title_index,
        state.generator.as_ref(),
        &request.message,
        &request.context,
    )
    .await?;

    tracing::info!(
        request_id = %request_id,
        reply_chars = reply.len(),
        "Chat reply generated"
    );

    Ok(Json(ChatResponse { reply }))
}
