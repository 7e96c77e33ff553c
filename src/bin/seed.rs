use axum_cart_api::{
    config::AppConfig,
    dto::products::ProductPayload,
    models::Cart,
    state::AppState,
    store::{CartStore, ProductStore},
};
use serde_json::Number;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let state = AppState::new(&config);

    let created = seed_products(&state.products).await?;
    let cart = ensure_cart(&state.carts).await?;

    println!(
        "Seed completed in {}: {created} products added, cart ID: {}",
        config.data_dir.display(),
        cart.id
    );
    Ok(())
}

async fn ensure_cart(carts: &CartStore) -> anyhow::Result<Cart> {
    let existing = carts
        .file()
        .read(|carts| Ok(carts.into_iter().next()))
        .await?;
    match existing {
        Some(cart) => {
            println!("Skipped cart: {} already present", cart.id);
            Ok(cart)
        }
        None => Ok(carts.create().await?),
    }
}

async fn seed_products(products: &ProductStore) -> anyhow::Result<usize> {
    let existing = products.list_all(None).await?;
    let samples = [
        ("Widget", "W1", "tools", 10.0, 5),
        ("Gadget", "G1", "tools", 24.5, 12),
        ("Notebook", "N1", "stationery", 3.2, 100),
    ];

    let mut created = 0;
    for (title, code, category, price, stock) in samples {
        if existing.iter().any(|p| p.code.as_deref() == Some(code)) {
            println!("Skipped product {code}: already present");
            continue;
        }
        products
            .create(ProductPayload {
                title: Some(title.to_string()),
                description: Some(format!("Sample {} product", title.to_lowercase())),
                code: Some(code.to_string()),
                price: Number::from_f64(price),
                stock: Some(stock),
                category: Some(category.to_string()),
                thumbnails: None,
                status: None,
            })
            .await?;
        created += 1;
    }

    Ok(created)
}
