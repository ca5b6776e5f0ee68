use crate::error::Result;
use crate::models::product::ProductInfo;
use crate::models::question::{Category, GeneratedQuestion};
use crate::services::inference::ModelRegistry;
use std::sync::Arc;

/// Both generation paths draw at most this many questions per category.
const QUESTIONS_PER_CATEGORY: usize = 2;

/// Model output shorter than this is discarded as noise.
const MIN_QUESTION_CHARS: usize = 10;

pub fn templates_for(category: Category) -> &'static [&'static str] {
    match category {
        Category::Ingredients => &[
            "What are the main ingredients in {product_name}?",
            "Are there any artificial preservatives or additives in {product_name}?",
            "What is the source of the primary ingredients in {product_name}?",
            "Are the ingredients in {product_name} organic or conventionally grown?",
            "What allergens are present in {product_name}?",
        ],
        Category::Manufacturing => &[
            "Where is {product_name} manufactured?",
            "What are the manufacturing processes used for {product_name}?",
            "Are there any quality control measures in place for {product_name}?",
            "What certifications does the manufacturing facility have?",
            "How is {product_name} packaged and stored?",
        ],
        Category::Environmental => &[
            "What is the carbon footprint of producing {product_name}?",
            "Are the packaging materials for {product_name} recyclable?",
            "What environmental impact does {product_name} have?",
            "Are sustainable practices used in the production of {product_name}?",
            "What waste management practices are in place for {product_name}?",
        ],
        Category::Social => &[
            "What are the labor practices in the supply chain for {product_name}?",
            "Are fair trade principles followed for {product_name}?",
            "What is the company's policy on worker safety for {product_name}?",
            "Are there any community impact initiatives related to {product_name}?",
            "What is the company's stance on diversity and inclusion?",
        ],
        Category::Health => &[
            "What are the nutritional benefits of {product_name}?",
            "Are there any health risks associated with {product_name}?",
            "What clinical studies support the health claims of {product_name}?",
            "How does {product_name} compare to similar products in terms of health benefits?",
            "What is the recommended daily intake for {product_name}?",
        ],
    }
}

#[derive(Clone)]
pub struct QuestionService {
    models: Arc<ModelRegistry>,
}

impl QuestionService {
    pub fn new(models: Arc<ModelRegistry>) -> Self {
        Self { models }
    }

    /// Model-backed generation first; an empty result (adapter absent or every
    /// invocation failed or was filtered) falls back to the template tables.
    pub async fn generate(&self, product: &ProductInfo) -> Result<Vec<GeneratedQuestion>> {
        let questions = self.generate_with_model(product).await;
        if questions.is_empty() {
            return Ok(generate_fallback(product));
        }
        Ok(questions)
    }

    async fn generate_with_model(&self, product: &ProductInfo) -> Vec<GeneratedQuestion> {
        let Some(generator) = &self.models.question_generator else {
            return Vec::new();
        };

        let context_text = product_context(product);
        let mut questions = Vec::new();

        for category in Category::ALL {
            let prompt = format!(
                "Generate a transparency question about {} for: {}",
                category.as_tag(),
                context_text
            );
            for _ in 0..QUESTIONS_PER_CATEGORY {
                match generator.generate(&prompt).await {
                    Ok(raw) => {
                        if let Some(text) = usable_question(&raw) {
                            questions.push(GeneratedQuestion::text_question(text, category));
                        }
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            category = category.as_tag(),
                            "question generation failed, skipping"
                        );
                    }
                }
            }
        }

        questions
    }
}

/// Flat descriptive string fed to the generation prompt.
fn product_context(product: &ProductInfo) -> String {
    let mut context = format!(
        "Product: {} Category: {} Manufacturer: {} ",
        product.name.as_deref().unwrap_or(""),
        product.category.as_deref().unwrap_or(""),
        product.manufacturer.as_deref().unwrap_or(""),
    );
    if let Some(description) = &product.description {
        context.push_str(&format!("Description: {} ", description));
    }
    if let Some(ingredients) = &product.ingredients {
        context.push_str(&format!("Ingredients: {} ", ingredients));
    }
    context
}

/// Strips boilerplate prefixes the generator tends to emit and drops
/// fragments too short to be a meaningful question.
fn usable_question(raw: &str) -> Option<String> {
    let mut text = raw.trim();
    for prefix in ["Question:", "Q:"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim_start();
        }
    }
    if text.chars().count() > MIN_QUESTION_CHARS {
        Some(text.to_string())
    } else {
        None
    }
}

/// Deterministic template path used whenever the model path yields nothing.
pub fn generate_fallback(product: &ProductInfo) -> Vec<GeneratedQuestion> {
    let product_name = product.display_name();
    let mut questions = Vec::new();

    for category in relevant_categories(product.category.as_deref().unwrap_or("")) {
        for template in templates_for(category).iter().take(QUESTIONS_PER_CATEGORY) {
            let text = template.replace("{product_name}", product_name);
            questions.push(GeneratedQuestion::text_question(text, category));
        }
    }

    questions
}

/// Ingredients and manufacturing always apply; the rest depend on the
/// product's declared category.
fn relevant_categories(raw_category: &str) -> Vec<Category> {
    let category = raw_category.to_lowercase();
    let mut relevant = vec![Category::Ingredients, Category::Manufacturing];

    if category.contains("food")
        || category.contains("beverage")
        || category.contains("cosmetic")
        || category.contains("beauty")
    {
        relevant.extend([Category::Health, Category::Environmental]);
    } else if category.contains("clothing") || category.contains("textile") {
        relevant.extend([Category::Social, Category::Environmental]);
    } else {
        relevant.extend([Category::Environmental, Category::Social]);
    }

    relevant
}
