use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let models = &state.models;
    let body = json!({
        "status": "healthy",
        "models_loaded": {
            "question_generator": models.question_generator.is_some(),
            "sentiment_analyzer": models.sentiment_analyzer.is_some(),
            "sentence_model": models.sentence_model.is_some(),
        },
        "gpu_available": models.gpu_available,
    });
    (StatusCode::OK, Json(body))
}
