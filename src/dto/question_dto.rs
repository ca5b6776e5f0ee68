use crate::models::product::ProductInfo;
use crate::models::question::GeneratedQuestion;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct GenerateQuestionsPayload {
    pub product: Option<ProductInfo>,
    /// Accepted for wire compatibility; generation builds its own context
    /// string from the product fields.
    pub context: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuestionsResponse {
    pub success: bool,
    pub questions: Vec<GeneratedQuestion>,
    pub count: usize,
}
