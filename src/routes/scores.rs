use crate::{
    dto::score_dto::{TransparencyScorePayload, TransparencyScoreResponse},
    error::{Error, Result},
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};

#[axum::debug_handler]
pub async fn transparency_score(
    State(state): State<AppState>,
    Json(payload): Json<TransparencyScorePayload>,
) -> Result<impl IntoResponse> {
    if payload.product.as_ref().map_or(true, |p| p.is_empty()) {
        return Err(Error::BadRequest(
            "Product information is required".to_string(),
        ));
    }

    let scores = state
        .scoring_service
        .score(&payload.questions)
        .await
        .map_err(|e| Error::handler("Failed to calculate transparency score", e))?;

    Ok(Json(TransparencyScoreResponse {
        success: true,
        scores,
    }))
}
