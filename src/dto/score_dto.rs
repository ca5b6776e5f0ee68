use crate::models::product::ProductInfo;
use crate::models::question::Category;
use crate::models::score::TransparencyScores;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TransparencyScorePayload {
    pub product: Option<ProductInfo>,
    #[serde(default)]
    pub questions: Vec<AnsweredQuestion>,
}

/// One question/answer record as supplied by the caller. The category is a
/// free-form tag; anything outside the fixed taxonomy is tolerated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnsweredQuestion {
    pub text: Option<String>,
    pub category: Option<String>,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Answer {
    pub value: Option<String>,
}

impl AnsweredQuestion {
    /// First answer value; the scorer never reads the rest.
    pub fn first_answer(&self) -> Option<&str> {
        self.answers.first().and_then(|a| a.value.as_deref())
    }

    pub fn parsed_category(&self) -> Option<Category> {
        self.category.as_deref().and_then(Category::from_tag)
    }
}

#[derive(Debug, Serialize)]
pub struct TransparencyScoreResponse {
    pub success: bool,
    pub scores: TransparencyScores,
}
