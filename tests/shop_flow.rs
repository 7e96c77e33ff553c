use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use axum_cart_api::{config::AppConfig, routes::create_app, state::AppState, store::ValidationMode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use tower::ServiceExt;

fn app_with(config: AppConfig) -> Router {
    create_app(AppState::new(&config))
}

fn test_app() -> (TempDir, Router) {
    let data = tempdir().expect("temp dir");
    let app = app_with(AppConfig::for_data_dir(data.path()));
    (data, app)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("valid request"))
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, value)
}

fn id_of(value: &Value) -> String {
    value
        .get("id")
        .and_then(Value::as_str)
        .expect("id present")
        .to_string()
}

// Create a product, fill a cart with it, then delete the product: the cart keeps the dangling id.
#[tokio::test]
async fn product_and_cart_scenario() {
    let (_data, app) = test_app();

    let (status, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"title": "Widget", "price": 10, "stock": 5, "code": "W1", "category": "tools"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(product["status"], json!(true));
    assert_eq!(product["thumbnails"], json!([]));
    assert_eq!(product["title"], json!("Widget"));
    assert_eq!(product["price"], json!(10));
    let product_id = id_of(&product);

    let (status, cart) = send(&app, "POST", "/api/carts", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cart["products"], json!([]));
    let cart_id = id_of(&cart);

    let add_uri = format!("/api/carts/{cart_id}/product/{product_id}");
    let (status, _) = send(&app, "POST", &add_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, cart) = send(&app, "POST", &add_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        cart["products"],
        json!([{"product": product_id, "quantity": 2}])
    );

    let (status, body) = send(&app, "DELETE", &format!("/api/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", &format!("/api/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Product not found"));

    let (status, lines) = send(&app, "GET", &format!("/api/carts/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lines, json!([{"product": product_id, "quantity": 2}]));
}

#[tokio::test]
async fn list_products_honours_limit() {
    let (_data, app) = test_app();
    for title in ["a", "b", "c", "d", "e"] {
        let (status, _) = send(&app, "POST", "/api/products", Some(json!({"title": title}))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, limited) = send(&app, "GET", "/api/products?limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = limited
        .as_array()
        .expect("array body")
        .iter()
        .map(|p| p["title"].clone())
        .collect();
    assert_eq!(titles, vec![json!("a"), json!("b")]);

    let (_, all) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(all.as_array().map(Vec::len), Some(5));

    let (status, empty_limit) = send(&app, "GET", "/api/products?limit=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty_limit, all);

    let (status, body) = send(&app, "GET", "/api/products?limit=lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn update_product_replaces_fields() {
    let (_data, app) = test_app();
    let (_, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"title": "Widget", "price": 10, "thumbnails": ["/a.png"]})),
    )
    .await;
    let product_id = id_of(&product);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/products/{product_id}"),
        Some(json!({"title": "Widget v2", "price": 12.5, "stock": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], json!(product_id));
    assert_eq!(updated["title"], json!("Widget v2"));
    assert_eq!(updated["price"], json!(12.5));
    assert_eq!(updated["thumbnails"], json!([]));
    assert_eq!(updated["status"], json!(true));

    let (status, body) = send(
        &app,
        "PUT",
        "/api/products/does-not-exist",
        Some(json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Product not found"));
}

#[tokio::test]
async fn delete_cart_returns_removed_cart() {
    let (_data, app) = test_app();
    let (_, cart) = send(&app, "POST", "/api/carts", None).await;
    let cart_id = id_of(&cart);
    send(&app, "POST", &format!("/api/carts/{cart_id}/product/p-1"), None).await;

    let (status, body) = send(&app, "DELETE", &format!("/api/carts/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Cart deleted"));
    assert_eq!(body["cart"]["id"], json!(cart_id));
    assert_eq!(
        body["cart"]["products"],
        json!([{"product": "p-1", "quantity": 1}])
    );

    let (status, body) = send(&app, "DELETE", &format!("/api/carts/{cart_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Cart not found"));

    let (status, _) = send(&app, "POST", &format!("/api/carts/{cart_id}/product/p-1"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_product_bodies_use_error_contract() {
    let (_data, app) = test_app();

    let (status, body) = send(&app, "POST", "/api/products", Some(json!({"price": "10"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "POST", "/api/products", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, product) = send(&app, "POST", "/api/products", Some(json!({"title": "Ok"}))).await;
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/products/{}", id_of(&product)),
        Some(json!({"stock": "many"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, all) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn strict_mode_rejects_incomplete_products() {
    let data = tempdir().expect("temp dir");
    let config = AppConfig {
        validation: ValidationMode::Strict,
        ..AppConfig::for_data_dir(data.path())
    };
    let app = app_with(config);

    let (status, body) = send(&app, "POST", "/api/products", Some(json!({"title": "Bare"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("missing fields"))
    );

    let (_, all) = send(&app, "GET", "/api/products", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn corrupt_store_file_is_a_server_error() {
    let (data, app) = test_app();
    std::fs::write(data.path().join("carts.json"), "not json at all").expect("write file");

    let (status, body) = send(&app, "POST", "/api/carts", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Internal Server Error"));
}

#[tokio::test]
async fn state_survives_a_new_app_instance() {
    let data = tempdir().expect("temp dir");
    let first = app_with(AppConfig::for_data_dir(data.path()));
    let (_, product) = send(&first, "POST", "/api/products", Some(json!({"title": "Kept"}))).await;
    let product_id = id_of(&product);

    let second = app_with(AppConfig::for_data_dir(data.path()));
    let (status, loaded) = send(&second, "GET", &format!("/api/products/{product_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, product);
}

#[tokio::test]
async fn unknown_route_uses_fallback() {
    let (_data, app) = test_app();
    let (status, body) = send(&app, "GET", "/api/orders", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], json!("/api/orders"));
}
