use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::products::{ProductList, ProductPayload},
    error::AppResult,
    models::Product,
    routes::params::ListQuery,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(ListQuery),
    responses(
        (status = 200, description = "List products", body = ProductList),
        (status = 400, description = "Invalid query"),
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> AppResult<Json<ProductList>> {
    let Query(query) = query?;
    let items = state.products.list_all(query.limit).await?;
    Ok(Json(ProductList { items }))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = Product),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = state.products.get_by_id(&id).await?;
    Ok(Json(product))
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Create product", body = Product),
        (status = 400, description = "Malformed body or rejected by strict validation"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let Json(payload) = payload?;
    let product = state.products.create(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Malformed body or rejected by strict validation"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<Json<Product>> {
    let Json(payload) = payload?;
    let product = state.products.update(&id, payload).await?;
    Ok(Json(product))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Deleted product"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.products.delete_by_id(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
