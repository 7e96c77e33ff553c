use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Cart, CartItem};

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CartItemList {
    #[schema(value_type = Vec<CartItem>)]
    pub items: Vec<CartItem>,
}

/// Confirmation body for a deleted cart.
#[derive(Debug, Serialize, ToSchema)]
pub struct CartRemoved {
    pub message: String,
    pub cart: Cart,
}
