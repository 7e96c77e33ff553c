use std::path::Path;

use serde_json::Map;

use crate::{dto::products::ProductPayload, models::Product};

use super::{
    DocumentFile, ValidationMode,
    error::{StoreError, StoreResult},
    ids::IdGenerator,
};

const ENTITY: &str = "Product";

pub const PRODUCTS_FILE: &str = "products.json";

/// CRUD over the product collection file.
#[derive(Debug)]
pub struct ProductStore {
    file: DocumentFile<Product>,
    ids: IdGenerator,
    validation: ValidationMode,
}

impl ProductStore {
    pub fn new(data_dir: &Path, ids: IdGenerator, validation: ValidationMode) -> Self {
        Self {
            file: DocumentFile::new(data_dir.join(PRODUCTS_FILE)),
            ids,
            validation,
        }
    }

    pub fn file(&self) -> &DocumentFile<Product> {
        &self.file
    }

    /// All products in stored order. A non-negative `limit` keeps only the first `limit`.
    pub async fn list_all(&self, limit: Option<i64>) -> StoreResult<Vec<Product>> {
        self.file
            .read(|mut products| {
                if let Some(limit) = limit.and_then(|l| usize::try_from(l).ok()) {
                    products.truncate(limit);
                }
                Ok(products)
            })
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> StoreResult<Product> {
        self.file
            .read(|products| {
                products
                    .into_iter()
                    .find(|p| p.id == id)
                    .ok_or_else(|| StoreError::not_found(ENTITY, id))
            })
            .await
    }

    pub async fn create(&self, payload: ProductPayload) -> StoreResult<Product> {
        self.check(&payload)?;

        let product = self
            .file
            .update(|products| {
                let id = self
                    .ids
                    .fresh_id_unless(|candidate| products.iter().any(|p| p.id == candidate));
                let product = Product {
                    id,
                    title: payload.title,
                    description: payload.description,
                    code: payload.code,
                    price: payload.price,
                    status: true,
                    stock: payload.stock,
                    category: payload.category,
                    thumbnails: payload.thumbnails.unwrap_or_default(),
                    extra: Map::new(),
                };
                products.push(product.clone());
                Ok(product)
            })
            .await?;

        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Replaces every field but `id`. `status` is kept unless the payload sets it.
    pub async fn update(&self, id: &str, payload: ProductPayload) -> StoreResult<Product> {
        self.check(&payload)?;

        let product = self
            .file
            .update(|products| {
                let existing = products
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| StoreError::not_found(ENTITY, id))?;

                existing.title = payload.title;
                existing.description = payload.description;
                existing.code = payload.code;
                existing.price = payload.price;
                existing.stock = payload.stock;
                existing.category = payload.category;
                existing.thumbnails = payload.thumbnails.unwrap_or_default();
                if let Some(status) = payload.status {
                    existing.status = status;
                }
                Ok(existing.clone())
            })
            .await?;

        tracing::info!(product_id = %product.id, "product updated");
        Ok(product)
    }

    /// Removes the product. Carts referencing it are left untouched.
    pub async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.file
            .update(|products| {
                let index = products
                    .iter()
                    .position(|p| p.id == id)
                    .ok_or_else(|| StoreError::not_found(ENTITY, id))?;
                products.remove(index);
                Ok(())
            })
            .await?;

        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }

    fn check(&self, payload: &ProductPayload) -> StoreResult<()> {
        match self.validation {
            ValidationMode::Permissive => Ok(()),
            ValidationMode::Strict => payload
                .validate_complete()
                .map_err(StoreError::Validation),
        }
    }
}
