use axum::{response::IntoResponse, Json};
use serde_json::json;

#[axum::debug_handler]
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "message": "Product Transparency AI Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/health",
            "/generate-questions",
            "/transparency-score",
        ],
    }))
}
