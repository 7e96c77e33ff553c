use std::path::Path;

use serde_json::Map;

use crate::models::{Cart, CartItem};

use super::{
    DocumentFile,
    error::{StoreError, StoreResult},
    ids::IdGenerator,
};

const ENTITY: &str = "Cart";

pub const CARTS_FILE: &str = "carts.json";

/// Cart collection plus the product-line merge logic.
#[derive(Debug)]
pub struct CartStore {
    file: DocumentFile<Cart>,
    ids: IdGenerator,
}

impl CartStore {
    pub fn new(data_dir: &Path, ids: IdGenerator) -> Self {
        Self {
            file: DocumentFile::new(data_dir.join(CARTS_FILE)),
            ids,
        }
    }

    pub fn file(&self) -> &DocumentFile<Cart> {
        &self.file
    }

    pub async fn create(&self) -> StoreResult<Cart> {
        let cart = self
            .file
            .update(|carts| {
                let id = self
                    .ids
                    .fresh_id_unless(|candidate| carts.iter().any(|c| c.id == candidate));
                let cart = Cart {
                    id,
                    products: Vec::new(),
                    extra: Map::new(),
                };
                carts.push(cart.clone());
                Ok(cart)
            })
            .await?;

        tracing::info!(cart_id = %cart.id, "cart created");
        Ok(cart)
    }

    pub async fn get_products(&self, cart_id: &str) -> StoreResult<Vec<CartItem>> {
        self.file
            .read(|carts| {
                carts
                    .into_iter()
                    .find(|c| c.id == cart_id)
                    .map(|c| c.products)
                    .ok_or_else(|| StoreError::not_found(ENTITY, cart_id))
            })
            .await
    }

    /// Adds one unit of `product_id` to the cart.
    ///
    /// An existing line for the product is incremented in place, so a cart never
    /// holds two lines for the same product. The product id is not looked up.
    pub async fn add_product(&self, cart_id: &str, product_id: &str) -> StoreResult<Cart> {
        let cart = self
            .file
            .update(|carts| {
                let cart = carts
                    .iter_mut()
                    .find(|c| c.id == cart_id)
                    .ok_or_else(|| StoreError::not_found(ENTITY, cart_id))?;

                match cart.products.iter().position(|line| line.product == product_id) {
                    Some(index) => {
                        let line = &mut cart.products[index];
                        line.quantity = line.quantity.checked_add(1).ok_or_else(|| {
                            StoreError::Validation(format!(
                                "quantity of product {product_id} cannot be increased further"
                            ))
                        })?;
                    }
                    None => cart.products.push(CartItem::new(product_id, 1)),
                }
                Ok(cart.clone())
            })
            .await?;

        tracing::debug!(cart_id = %cart_id, product_id = %product_id, "product added to cart");
        Ok(cart)
    }

    /// Removes the cart and hands back the removed record.
    pub async fn delete_by_id(&self, cart_id: &str) -> StoreResult<Cart> {
        let removed = self
            .file
            .update(|carts| {
                let index = carts
                    .iter()
                    .position(|c| c.id == cart_id)
                    .ok_or_else(|| StoreError::not_found(ENTITY, cart_id))?;
                Ok(carts.remove(index))
            })
            .await?;

        tracing::info!(cart_id = %removed.id, "cart deleted");
        Ok(removed)
    }
}
