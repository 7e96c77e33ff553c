use std::sync::Arc;

use crate::{
    config::AppConfig,
    store::{CartStore, IdGenerator, ProductStore},
};

/// One owning store per collection, shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductStore>,
    pub carts: Arc<CartStore>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let products = ProductStore::new(
            &config.data_dir,
            IdGenerator::new(config.id_strategy),
            config.validation,
        );
        let carts = CartStore::new(&config.data_dir, IdGenerator::new(config.id_strategy));
        Self {
            products: Arc::new(products),
            carts: Arc::new(carts),
        }
    }
}
