use crate::{
    dto::question_dto::{GenerateQuestionsPayload, GenerateQuestionsResponse},
    error::{Error, Result},
    AppState,
};
use axum::{extract::State, response::IntoResponse, Json};

#[axum::debug_handler]
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuestionsPayload>,
) -> Result<impl IntoResponse> {
    let product = payload
        .product
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::BadRequest("Product information is required".to_string()))?;

    tracing::debug!(
        context = ?payload.context,
        question_type = ?payload.question_type,
        "generating questions"
    );

    let questions = state
        .question_service
        .generate(&product)
        .await
        .map_err(|e| Error::handler("Failed to generate questions", e))?;

    Ok(Json(GenerateQuestionsResponse {
        success: true,
        count: questions.len(),
        questions,
    }))
}
