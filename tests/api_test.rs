use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use transparency_ai_service::{app, services::inference::ModelRegistry, AppState};

/// Router with no model adapters loaded; every request exercises the
/// deterministic fallback paths.
fn fallback_router() -> Router {
    app(AppState::new(ModelRegistry::default()))
}

async fn send_json(router: Router, method: &str, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, JsonValue) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let body = serde_json::from_slice(&bytes).expect("json body");
    (status, body)
}

#[tokio::test]
async fn root_describes_the_service() {
    let (status, body) = get_json(fallback_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product Transparency AI Service");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    let endpoints: Vec<&str> = body["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        endpoints,
        vec!["/health", "/generate-questions", "/transparency-score"]
    );
}

#[tokio::test]
async fn health_reports_absent_models() {
    let (status, body) = get_json(fallback_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["models_loaded"]["question_generator"], false);
    assert_eq!(body["models_loaded"]["sentiment_analyzer"], false);
    assert_eq!(body["models_loaded"]["sentence_model"], false);
    assert_eq!(body["gpu_available"], false);
}

#[tokio::test]
async fn generate_questions_rejects_missing_product() {
    let (status, body) =
        send_json(fallback_router(), "POST", "/generate-questions", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product information is required");
}

#[tokio::test]
async fn generate_questions_rejects_empty_product() {
    let (status, body) = send_json(
        fallback_router(),
        "POST",
        "/generate-questions",
        json!({ "product": {} }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product information is required");
}

#[tokio::test]
async fn transparency_score_rejects_missing_product() {
    let (status, body) = send_json(
        fallback_router(),
        "POST",
        "/transparency-score",
        json!({ "questions": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Product information is required");
}

#[tokio::test]
async fn beverage_product_gets_eight_fallback_questions() {
    let payload = json!({ "product": { "name": "Oat Milk", "category": "beverage" } });
    let (status, body) =
        send_json(fallback_router(), "POST", "/generate-questions", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 8);

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 8);
    assert_eq!(
        questions[0]["text"],
        "What are the main ingredients in Oat Milk?"
    );
    for question in questions {
        assert_eq!(question["type"], "TEXT");
        let category = question["category"].as_str().unwrap();
        let required = matches!(category, "ingredients" | "manufacturing");
        assert_eq!(question["isRequired"], required);
    }

    let categories: Vec<&str> = questions
        .iter()
        .map(|q| q["category"].as_str().unwrap())
        .collect();
    for expected in ["ingredients", "manufacturing", "health", "environmental"] {
        assert!(categories.contains(&expected), "missing {}", expected);
    }
    assert!(!categories.contains(&"social"));
}

#[tokio::test]
async fn fallback_generation_is_idempotent() {
    let payload = json!({ "product": { "name": "Oat Milk", "category": "beverage" } });
    let (_, first) = send_json(
        fallback_router(),
        "POST",
        "/generate-questions",
        payload.clone(),
    )
    .await;
    let (_, second) =
        send_json(fallback_router(), "POST", "/generate-questions", payload).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn empty_question_list_scores_neutral() {
    let payload = json!({
        "product": { "name": "Oat Milk", "category": "beverage" },
        "questions": [],
    });
    let (status, body) =
        send_json(fallback_router(), "POST", "/transparency-score", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["scores"]["transparency"], 0.5);
    assert_eq!(body["scores"]["health"], 0.5);
    assert_eq!(body["scores"]["environmental"], 0.5);
    assert_eq!(body["scores"]["social"], 0.5);
}

#[tokio::test]
async fn answered_questions_drive_fallback_scores() {
    let long_answer = "a".repeat(200);
    let payload = json!({
        "product": { "name": "Oat Milk", "category": "beverage" },
        "questions": [
            {
                "text": "Are the packaging materials recyclable?",
                "category": "environmental",
                "answers": [{ "value": long_answer }],
            },
            {
                "text": "Where is it manufactured?",
                "category": "manufacturing",
                "answers": [],
            },
        ],
    });
    let (status, body) =
        send_json(fallback_router(), "POST", "/transparency-score", payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    // One saturated answer across two questions.
    assert_eq!(body["scores"]["transparency"], 0.5);
    assert_eq!(body["scores"]["environmental"], 0.6);
    assert_eq!(body["scores"]["social"], 0.6);
    assert_eq!(body["scores"]["health"], 0.5);

    for key in ["transparency", "health", "environmental", "social"] {
        let score = body["scores"][key].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&score));
    }
}
