use serde::{Deserialize, Serialize};

/// Free-text product fields supplied per request, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductInfo {
    pub name: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
}

impl ProductInfo {
    /// An all-empty product is rejected the same way a missing one is.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.manufacturer.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("this product")
    }
}
