//! Cart API over HTTP.

use reqwest::StatusCode;
use serde_json::json;
use tienda_core::{CartId, ProductId};
use tienda_integration_tests::{TestServer, json_body};

#[tokio::test]
async fn test_adding_same_product_twice_accumulates() {
    let server = TestServer::spawn().await;
    let product = server.create_product("A", 10.0, "x").await;
    let cart = server.create_cart().await;
    let path = format!("/api/carts/{cart}/products/{product}");

    let resp = server.post(&path, &json!({"quantity": 2})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Product added to cart");

    let resp = server.post(&path, &json!({"quantity": 3})).await;
    let body = json_body(resp).await;
    assert_eq!(
        body["cart"]["products"],
        json!([{"product": product, "quantity": 5}])
    );
}

#[tokio::test]
async fn test_string_quantity_is_added_numerically() {
    let server = TestServer::spawn().await;
    let product = server.create_product("A", 10.0, "x").await;
    let cart = server.create_cart().await;
    let path = format!("/api/carts/{cart}/products/{product}");

    server.post(&path, &json!({"quantity": "2"})).await;
    let resp = server.post(&path, &json!({"quantity": "3"})).await;
    let body = json_body(resp).await;
    assert_eq!(body["cart"]["products"][0]["quantity"], 5);
}

#[tokio::test]
async fn test_missing_quantity_defaults_to_one() {
    let server = TestServer::spawn().await;
    let product = server.create_product("A", 10.0, "x").await;
    let cart = server.create_cart().await;

    let resp = server
        .client()
        .post(server.url(&format!("/api/carts/{cart}/products/{product}")))
        .send()
        .await
        .unwrap_or_else(|e| panic!("POST failed: {e}"));
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["cart"]["products"][0]["quantity"], 1);
}

#[tokio::test]
async fn test_add_to_new_cart_creates_single_item_cart() {
    let server = TestServer::spawn().await;
    let product = server.create_product("A", 10.0, "x").await;

    let resp = server
        .post(
            &format!("/api/carts/new/products/{product}"),
            &json!({"quantity": 4}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    let cart = body["cart"]["_id"].as_str().unwrap_or_default().to_string();
    assert_eq!(
        body["cart"]["products"],
        json!([{"product": product, "quantity": 4}])
    );

    let resp = server.get(&format!("/api/carts/{cart}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_unknown_product_or_cart_is_not_found() {
    let server = TestServer::spawn().await;
    let cart = server.create_cart().await;

    let resp = server
        .post(
            &format!("/api/carts/{cart}/products/{}", ProductId::generate()),
            &json!({"quantity": 1}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["message"], "Product not found");

    let product = server.create_product("A", 10.0, "x").await;
    let resp = server
        .post(
            &format!("/api/carts/{}/products/{product}", CartId::generate()),
            &json!({"quantity": 1}),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["message"], "Cart not found");
}

#[tokio::test]
async fn test_remove_item_not_in_cart_is_distinct_from_missing_cart() {
    let server = TestServer::spawn().await;
    let cart = server.create_cart().await;
    let product = ProductId::generate();

    let resp = server
        .delete(&format!("/api/carts/{cart}/products/{product}"))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["message"], "Product not found in cart");

    let resp = server
        .delete(&format!("/api/carts/{}/products/{product}", CartId::generate()))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["message"], "Cart not found");
}

#[tokio::test]
async fn test_remove_item() {
    let server = TestServer::spawn().await;
    let product = server.create_product("A", 10.0, "x").await;
    let cart = server.create_cart().await;
    let path = format!("/api/carts/{cart}/products/{product}");
    server.post(&path, &json!({"quantity": 1})).await;

    let resp = server.delete(&path).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["message"], "Product removed from cart");

    let body = json_body(server.get(&format!("/api/carts/{cart}")).await).await;
    assert_eq!(body["payload"]["products"], json!([]));
}

#[tokio::test]
async fn test_replace_keeps_duplicates_verbatim() {
    let server = TestServer::spawn().await;
    let cart = server.create_cart().await;
    let product = ProductId::generate().to_string();
    let items = json!([
        {"product": product, "quantity": 1},
        {"product": product, "quantity": 2}
    ]);

    let resp = server
        .put(&format!("/api/carts/{cart}"), &json!({"products": items}))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["payload"]["products"], items);

    // The products no longer exist, so expansion yields nulls.
    let body = json_body(server.get(&format!("/api/carts/{cart}")).await).await;
    assert_eq!(
        body["payload"]["products"],
        json!([
            {"product": null, "quantity": 1},
            {"product": null, "quantity": 2}
        ])
    );
}

#[tokio::test]
async fn test_set_quantity() {
    let server = TestServer::spawn().await;
    let product = server.create_product("A", 10.0, "x").await;
    let cart = server.create_cart().await;
    let path = format!("/api/carts/{cart}/products/{product}");

    let resp = server.put(&path, &json!({"quantity": 3})).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["message"], "Product not found in cart");

    server.post(&path, &json!({"quantity": 1})).await;
    let resp = server.put(&path, &json!({"quantity": 9})).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["payload"]["products"][0]["quantity"], 9);

    let resp = server.put(&path, &json!({"quantity": "nine"})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_expanded_cart_and_clear() {
    let server = TestServer::spawn().await;
    let product = server.create_product("Mug", 4.5, "kitchen").await;
    let cart = server.create_cart().await;
    server
        .post(
            &format!("/api/carts/{cart}/products/{product}"),
            &json!({"quantity": 2}),
        )
        .await;

    let body = json_body(server.get(&format!("/api/carts/{cart}")).await).await;
    assert_eq!(body["payload"]["products"][0]["product"]["name"], "Mug");
    assert_eq!(body["payload"]["products"][0]["quantity"], 2);

    let resp = server.delete(&format!("/api/carts/{cart}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        json_body(resp).await["message"],
        "All products removed from cart"
    );

    let resp = server.get(&format!("/api/carts/{cart}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["payload"]["products"], json!([]));
}

#[tokio::test]
async fn test_malformed_cart_id_is_bad_request() {
    let server = TestServer::spawn().await;
    let resp = server.get("/api/carts/xyz").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["status"], "error");
}
