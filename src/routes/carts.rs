use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};

use crate::{
    dto::cart::{CartItemList, CartRemoved},
    error::AppResult,
    models::Cart,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route("/{id}", axum::routing::get(cart_products).delete(delete_cart))
        .route("/{id}/product/{product_id}", post(add_product))
}

#[utoipa::path(
    post,
    path = "/api/carts",
    responses(
        (status = 201, description = "Create empty cart", body = Cart)
    ),
    tag = "Carts"
)]
pub async fn create_cart(State(state): State<AppState>) -> AppResult<(StatusCode, Json<Cart>)> {
    let cart = state.carts.create().await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

#[utoipa::path(
    get,
    path = "/api/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Products in the cart", body = CartItemList),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn cart_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CartItemList>> {
    let items = state.carts.get_products(&id).await?;
    Ok(Json(CartItemList { items }))
}

#[utoipa::path(
    post,
    path = "/api/carts/{id}/product/{product_id}",
    params(
        ("id" = String, Path, description = "Cart ID"),
        ("product_id" = String, Path, description = "Product ID, not checked against the catalogue")
    ),
    responses(
        (status = 200, description = "Updated cart", body = Cart),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(String, String)>,
) -> AppResult<Json<Cart>> {
    let cart = state.carts.add_product(&id, &product_id).await?;
    Ok(Json(cart))
}

#[utoipa::path(
    delete,
    path = "/api/carts/{id}",
    params(
        ("id" = String, Path, description = "Cart ID")
    ),
    responses(
        (status = 200, description = "Deleted cart", body = CartRemoved),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn delete_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<CartRemoved>> {
    let cart = state.carts.delete_by_id(&id).await?;
    Ok(Json(CartRemoved {
        message: "Cart deleted".to_string(),
        cart,
    }))
}
