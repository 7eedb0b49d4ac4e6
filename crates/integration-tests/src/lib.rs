//! Integration tests for Tienda.
//!
//! Each test boots the full storefront router on an ephemeral local port,
//! backed by a fresh in-memory store, and talks to it over HTTP.
//!
//! ```bash
//! cargo test -p tienda-integration-tests
//! ```

use reqwest::{Client, Response, StatusCode};
use serde_json::{Value, json};
use tienda_storefront::config::StorefrontConfig;
use tienda_storefront::state::AppState;
use tokio::net::TcpListener;

/// A storefront server running in the background of the current test.
pub struct TestServer {
    base_url: String,
    client: Client,
}

impl TestServer {
    /// Start a server with an empty in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let config = StorefrontConfig::ephemeral();
        let listener = TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let app = tienda_storefront::app(AppState::in_memory(config));
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Client::new(),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// GET `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    /// POST `body` as JSON to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST failed")
    }

    /// PUT `body` as JSON to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn put(&self, path: &str, body: &Value) -> Response {
        self.client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("PUT failed")
    }

    /// DELETE `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .expect("DELETE failed")
    }

    /// Create a product and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the product is not created.
    pub async fn create_product(&self, name: &str, price: f64, category: &str) -> String {
        let resp = self
            .post(
                "/api/products",
                &json!({"name": name, "price": price, "category": category}),
            )
            .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = json_body(resp).await;
        body["payload"]["_id"]
            .as_str()
            .expect("product has an _id")
            .to_string()
    }

    /// Create an empty cart and return its ID.
    ///
    /// # Panics
    ///
    /// Panics if the cart is not created.
    pub async fn create_cart(&self) -> String {
        let resp = self.client.post(self.url("/api/carts")).send().await.expect("POST failed");
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = json_body(resp).await;
        body["payload"]["_id"]
            .as_str()
            .expect("cart has an _id")
            .to_string()
    }
}

/// Decode a JSON response body.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json_body(resp: Response) -> Value {
    resp.json().await.expect("response body is JSON")
}
