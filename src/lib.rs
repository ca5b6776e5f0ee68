pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::services::{
    inference::ModelRegistry, question::QuestionService, scoring::ScoringService,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub models: Arc<ModelRegistry>,
    pub question_service: QuestionService,
    pub scoring_service: ScoringService,
}

impl AppState {
    pub fn new(models: ModelRegistry) -> Self {
        let models = Arc::new(models);

        Self {
            question_service: QuestionService::new(models.clone()),
            scoring_service: ScoringService::new(models.clone()),
            models,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index::index))
        .route("/health", get(routes::health::health))
        .route("/generate-questions", post(routes::questions::generate_questions))
        .route("/transparency-score", post(routes::scores::transparency_score))
        .with_state(state)
}
