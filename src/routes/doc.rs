use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{CartItemList, CartRemoved},
        products::{ProductList, ProductPayload},
    },
    models::{Cart, CartItem, Product},
    response::ApiResponse,
    routes::{carts, health, params, products},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        carts::create_cart,
        carts::cart_products,
        carts::add_product,
        carts::delete_cart
    ),
    components(
        schemas(
            Product,
            Cart,
            CartItem,
            ProductPayload,
            ProductList,
            CartItemList,
            CartRemoved,
            params::ListQuery,
            health::HealthData,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Carts", description = "Cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
