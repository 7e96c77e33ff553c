use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::ToSchema;

use crate::models::Product;

/// Body accepted by both create and update.
///
/// Every field is optional: in the default permissive mode a missing field is
/// simply stored as absent.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub code: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Number>,
    pub stock: Option<i64>,
    pub category: Option<String>,
    pub thumbnails: Option<Vec<String>>,
    /// Ignored on create. On update, replaces the stored status when present.
    pub status: Option<bool>,
}

impl ProductPayload {
    /// Checks used by strict validation mode.
    pub fn validate_complete(&self) -> Result<(), String> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.description.is_none() {
            missing.push("description");
        }
        if self.code.is_none() {
            missing.push("code");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.stock.is_none() {
            missing.push("stock");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if !missing.is_empty() {
            return Err(format!("missing fields: {}", missing.join(", ")));
        }

        if self
            .price
            .as_ref()
            .and_then(Number::as_f64)
            .is_some_and(|p| p < 0.0)
        {
            return Err("price must be a non-negative number".to_string());
        }
        if self.stock.is_some_and(|s| s < 0) {
            return Err("stock must not be negative".to_string());
        }
        Ok(())
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
