//! End-to-end tests for the shop API.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The API server running (cargo run -p mobile-shop-api)
//! - At least one product named "Apple iPhone 8 Plus" seeded in the catalog
//!
//! Run with: cargo test -p mobile-shop-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
fn base_url() -> String {
    std::env::var("SHOP_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

/// Test helper: register a fresh user with a unique name, returning the body.
async fn register_user(client: &Client, username: &str) -> Value {
    let resp = client
        .post(format!("{}/register", base_url()))
        .json(&json!({
            "username": username,
            "password": "pw",
            "email": "a@b.c",
            "address": "addr",
            "phone": "8999999999",
        }))
        .send()
        .await
        .expect("Failed to register");

    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("Failed to read register body")
}

/// Test helper: a username that cannot collide across runs.
fn unique_username(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4().simple())
}

/// Test helper: the seeded catalog, at least `min` products deep.
async fn catalog(client: &Client, min: usize) -> Vec<Value> {
    let resp = client
        .get(format!("{}/catalog", base_url()))
        .send()
        .await
        .expect("Failed to fetch catalog");

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Value> = resp.json().await.expect("Failed to read catalog");
    assert!(
        products.len() >= min,
        "catalog must be seeded with at least {min} products"
    );
    products
}

/// Test helper: the id of the first catalog product.
async fn first_product(client: &Client) -> Value {
    catalog(client, 1).await.into_iter().next().expect("non-empty")
}

// ============================================================================
// Registration & Login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_register_twice_conflicts_and_first_record_survives() {
    let client = Client::new();
    let username = unique_username("dup");

    let first = register_user(&client, &username).await;
    let token = first["token"].as_str().expect("token").to_owned();

    let resp = client
        .post(format!("{}/register", base_url()))
        .json(&json!({
            "username": username,
            "password": "other",
            "email": "x@y.z",
            "address": "elsewhere",
            "phone": "0",
        }))
        .send()
        .await
        .expect("Failed to re-register");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // First registration is unaffected: its token still authenticates.
    let resp = client
        .get(format!("{}/user", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to fetch user");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_login_wrong_password_is_unauthorized() {
    let client = Client::new();
    let username = unique_username("badpw");
    register_user(&client, &username).await;

    let resp = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "username": username, "password": "wrong" }))
        .send()
        .await
        .expect("Failed to login");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("body");
    assert!(body.get("token").is_none(), "must never leak a token");
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_protected_route_rejects_missing_and_garbage_tokens() {
    let client = Client::new();

    let resp = client
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth("not-a-token")
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_catalog_names_are_unique() {
    let client = Client::new();
    let products = catalog(&client, 1).await;

    // Orders re-price lines by product name, so a name must identify
    // exactly one catalog row.
    let mut names: Vec<&str> = products
        .iter()
        .map(|p| p["name"].as_str().expect("product name"))
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total, "catalog contains duplicate product names");
}

// ============================================================================
// Cart Consistency
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_adding_same_product_twice_merges_into_one_line() {
    let client = Client::new();
    let user = register_user(&client, &unique_username("merge")).await;
    let token = user["token"].as_str().expect("token");

    let product = first_product(&client).await;
    let product_id = product["id"].as_str().expect("product id");

    for quantity in [1, 2] {
        let resp = client
            .post(format!("{}/cart", base_url()))
            .bearer_auth(token)
            .json(&json!({ "product": product_id, "quantity": quantity }))
            .send()
            .await
            .expect("add to cart");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");

    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 1, "same product must merge, never duplicate");
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["product"]["id"], product_id);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_adding_distinct_products_keeps_distinct_lines() {
    let client = Client::new();
    let user = register_user(&client, &unique_username("twoline")).await;
    let token = user["token"].as_str().expect("token");

    let products = catalog(&client, 2).await;
    let first_id = products[0]["id"].as_str().expect("product id");
    let second_id = products[1]["id"].as_str().expect("product id");

    for (product_id, quantity) in [(first_id, 1), (second_id, 2)] {
        let resp = client
            .post(format!("{}/cart", base_url()))
            .bearer_auth(token)
            .json(&json!({ "product": product_id, "quantity": quantity }))
            .send()
            .await
            .expect("add to cart");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");

    // Different products must never merge or drop each other's line.
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product"]["id"], first_id);
    assert_eq!(items[0]["quantity"], 1);
    assert_eq!(items[1]["product"]["id"], second_id);
    assert_eq!(items[1]["quantity"], 2);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_cart_is_null_before_first_add() {
    let client = Client::new();
    let user = register_user(&client, &unique_username("nocart")).await;
    let token = user["token"].as_str().expect("token");

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");

    assert!(cart.is_null());
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_remove_item_is_idempotent() {
    let client = Client::new();
    let user = register_user(&client, &unique_username("remove")).await;
    let token = user["token"].as_str().expect("token");

    let product = first_product(&client).await;
    client
        .post(format!("{}/cart", base_url()))
        .bearer_auth(token)
        .json(&json!({ "product": product["id"], "quantity": 1 }))
        .send()
        .await
        .expect("add to cart");

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");
    let cart_id = cart["id"].as_str().expect("cart id").to_owned();
    let item_id = cart["items"][0]["id"].as_str().expect("item id").to_owned();

    // Removing twice must land in the same state as removing once.
    for _ in 0..2 {
        let resp = client
            .put(format!("{}/cart", base_url()))
            .bearer_auth(token)
            .json(&json!({ "cartId": cart_id, "itemId": item_id }))
            .send()
            .await
            .expect("remove item");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");

    // The cart itself survives with no lines.
    assert_eq!(cart["items"].as_array().expect("items").len(), 0);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_foreign_cart_cannot_be_cleared() {
    let client = Client::new();

    let victim = register_user(&client, &unique_username("victim")).await;
    let victim_token = victim["token"].as_str().expect("token");
    let attacker = register_user(&client, &unique_username("attacker")).await;
    let attacker_token = attacker["token"].as_str().expect("token");

    let product = first_product(&client).await;
    client
        .post(format!("{}/cart", base_url()))
        .bearer_auth(victim_token)
        .json(&json!({ "product": product["id"], "quantity": 1 }))
        .send()
        .await
        .expect("add to cart");

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(victim_token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");
    let cart_id = cart["id"].as_str().expect("cart id");

    // Another authenticated user knowing the raw cart id gets a no-op.
    client
        .delete(format!("{}/cart?id={cart_id}", base_url()))
        .bearer_auth(attacker_token)
        .send()
        .await
        .expect("clear cart");

    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(victim_token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");
    assert!(!cart.is_null(), "victim's cart must survive");
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_order_append_is_monotonic() {
    let client = Client::new();
    let user = register_user(&client, &unique_username("orders")).await;
    let token = user["token"].as_str().expect("token");

    let product = first_product(&client).await;
    let name = product["name"].as_str().expect("name");

    for _ in 0..2 {
        let resp = client
            .post(format!("{}/order", base_url()))
            .bearer_auth(token)
            .json(&json!({
                "order": [{
                    "name": name,
                    "price": 700,
                    "quantity": 2,
                    "dateCreated": 1_643_796_608_156_i64,
                }]
            }))
            .send()
            .await
            .expect("place order");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let profile: Value = client
        .get(format!("{}/user", base_url()))
        .bearer_auth(token)
        .send()
        .await
        .expect("get user")
        .json()
        .await
        .expect("user body");

    let orders = profile["orders"].as_array().expect("orders");
    assert_eq!(orders.len(), 2, "each placement must append, never rewrite");
    assert_eq!(orders[0]["name"], name);
    assert_eq!(orders[1]["name"], name);
}

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_order_with_unknown_product_is_rejected() {
    let client = Client::new();
    let user = register_user(&client, &unique_username("badorder")).await;
    let token = user["token"].as_str().expect("token");

    let resp = client
        .post(format!("{}/order", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "order": [{
                "name": "No Such Phone",
                "price": 1,
                "quantity": 1,
                "dateCreated": 1_643_796_608_156_i64,
            }]
        }))
        .send()
        .await
        .expect("place order");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Full Flow
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and seeded database"]
async fn test_full_shop_flow() {
    let client = Client::new();
    let username = unique_username("vasya");

    // Register: 201 with a non-empty token.
    let registered = register_user(&client, &username).await;
    let token = registered["token"].as_str().expect("token").to_owned();
    assert!(!token.is_empty());

    // Login: 200 with the same token (no rotation).
    let resp = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "username": username, "password": "pw" }))
        .send()
        .await
        .expect("login");
    assert_eq!(resp.status(), StatusCode::OK);
    let logged_in: Value = resp.json().await.expect("login body");
    assert_eq!(logged_in["token"].as_str(), Some(token.as_str()));

    // Add one unit, then two more of the same product.
    let product = first_product(&client).await;
    let product_id = product["id"].as_str().expect("product id");
    for quantity in [1, 2] {
        client
            .post(format!("{}/cart", base_url()))
            .bearer_auth(&token)
            .json(&json!({ "product": product_id, "quantity": quantity }))
            .send()
            .await
            .expect("add to cart");
    }

    // The cart holds one merged line with quantity 3.
    let cart: Value = client
        .get(format!("{}/cart", base_url()))
        .bearer_auth(&token)
        .send()
        .await
        .expect("get cart")
        .json()
        .await
        .expect("cart body");
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
}
