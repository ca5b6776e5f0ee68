use serde::{Deserialize, Serialize};

/// Fixed taxonomy used to group both question templates and scoring buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Ingredients,
    Manufacturing,
    Environmental,
    Social,
    Health,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Ingredients,
        Category::Manufacturing,
        Category::Environmental,
        Category::Social,
        Category::Health,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            Category::Ingredients => "ingredients",
            Category::Manufacturing => "manufacturing",
            Category::Environmental => "environmental",
            Category::Social => "social",
            Category::Health => "health",
        }
    }

    /// Lenient parser for caller-supplied tags; unknown tags yield None and
    /// are simply not bucketed by the scorer.
    pub fn from_tag(tag: &str) -> Option<Category> {
        match tag.trim().to_lowercase().as_str() {
            "ingredients" => Some(Category::Ingredients),
            "manufacturing" => Some(Category::Manufacturing),
            "environmental" => Some(Category::Environmental),
            "social" => Some(Category::Social),
            "health" => Some(Category::Health),
            _ => None,
        }
    }

    /// Ingredient and manufacturing questions are mandatory in the product form.
    pub fn is_required(&self) -> bool {
        matches!(self, Category::Ingredients | Category::Manufacturing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: String,
    pub category: Category,
    #[serde(rename = "isRequired")]
    pub is_required: bool,
}

impl GeneratedQuestion {
    /// All questions produced by this service are free-text.
    pub fn text_question(text: String, category: Category) -> Self {
        Self {
            text,
            question_type: "TEXT".to_string(),
            category,
            is_required: category.is_required(),
        }
    }
}
