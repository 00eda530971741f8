//! Commerce backend API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! All domain data lives behind an external REST API. This client owns the
//! wire format: bearer auth, offset/limit paging envelopes, and the error
//! body shape. The base URL is injected at construction — nothing here
//! reads the environment.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The bearer token was missing, invalid, or expired on the backend.
    #[error("backend rejected credentials")]
    Unauthorized,
    /// Any other non-2xx response.
    #[error("backend error {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

/// One page of a listing: the rows plus the dataset-wide record count.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total_record_count: u64,
}

// =============================================================================
// ENTITY ROWS
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: i64,
    pub stock: i64,
    pub categories: Vec<ProductCategory>,
}

/// Join row linking a product to a category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub category: CategoryName,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryName {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user: CategoryName,
    pub total_price: i64,
    /// Upstream status string; known values are listed in [`OrderStatus`].
    pub status: String,
    pub products: Vec<OrderLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: i64,
    pub product: OrderLineProduct,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineProduct {
    pub name: String,
    pub price: i64,
    pub image: String,
}

/// Statuses the backend accepts for `PATCH /orders/status/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PROCESSING" => Some(Self::Processing),
            "SHIPPED" => Some(Self::Shipped),
            "DELIVERED" => Some(Self::Delivered),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
        }
    }
}

// =============================================================================
// WRITE BODIES
// =============================================================================

#[derive(Debug, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i64,
    pub categories: Vec<String>,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct NewOrderLine {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct NewOrder {
    pub user_id: String,
    pub products: Vec<NewOrderLine>,
}

// =============================================================================
// CLIENT
// =============================================================================

/// Thin `reqwest` wrapper bound to one backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /auth/login` — exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let value = decoded(resp).await?;
        value
            .get("access_token")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ApiError::Decode("login response missing access_token".into()))
    }

    /// `GET /auth/profile` — check that a bearer token is still honored.
    pub async fn profile(&self, token: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .get(self.url("/auth/profile"))
            .bearer_auth(token)
            .send()
            .await?;
        decoded(resp).await.map(|_| ())
    }

    /// `POST /auth/signup` — create an admin user.
    pub async fn signup(&self, token: &str, user: &NewUser) -> Result<(), ApiError> {
        self.post_json("/auth/signup", token, user).await
    }

    // -- listings -------------------------------------------------------------

    pub async fn list_users(&self, token: &str, offset: u64, limit: u64) -> Result<Page<User>, ApiError> {
        self.list("/users", "users", token, offset, limit).await
    }

    pub async fn list_products(&self, token: &str, offset: u64, limit: u64) -> Result<Page<Product>, ApiError> {
        self.list("/products", "products", token, offset, limit).await
    }

    pub async fn list_categories(&self, token: &str, offset: u64, limit: u64) -> Result<Page<Category>, ApiError> {
        self.list("/categories", "categories", token, offset, limit).await
    }

    pub async fn list_orders(&self, token: &str, offset: u64, limit: u64) -> Result<Page<Order>, ApiError> {
        self.list("/orders", "orders", token, offset, limit).await
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        token: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Page<T>, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("{path}?offset={offset}&limit={limit}")))
            .bearer_auth(token)
            .send()
            .await?;
        parse_page(decoded(resp).await?, key)
    }

    // -- single records -------------------------------------------------------

    pub async fn get_product(&self, token: &str, id: &str) -> Result<Product, ApiError> {
        self.get_record(&format!("/products/{id}"), token).await
    }

    pub async fn get_order(&self, token: &str, id: &str) -> Result<Order, ApiError> {
        self.get_record(&format!("/orders/{id}"), token).await
    }

    async fn get_record<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
        let resp = self.http.get(self.url(path)).bearer_auth(token).send().await?;
        let value = decoded(resp).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // -- mutations ------------------------------------------------------------

    pub async fn create_product(&self, token: &str, product: &NewProduct) -> Result<(), ApiError> {
        self.post_json("/products", token, product).await
    }

    pub async fn update_product(&self, token: &str, id: &str, product: &NewProduct) -> Result<(), ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("/products/{id}")))
            .bearer_auth(token)
            .json(product)
            .send()
            .await?;
        decoded(resp).await.map(|_| ())
    }

    pub async fn delete_product(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/products/{id}"), token).await
    }

    pub async fn create_category(&self, token: &str, name: &str) -> Result<(), ApiError> {
        self.post_json("/categories", token, &serde_json::json!({ "name": name })).await
    }

    pub async fn delete_category(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.delete(&format!("/categories/{id}"), token).await
    }

    pub async fn create_order(&self, token: &str, order: &NewOrder) -> Result<(), ApiError> {
        self.post_json("/orders", token, order).await
    }

    /// `PATCH /users/{id}/promote` — promote a USER to ADMIN.
    pub async fn promote_user(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("/users/{id}/promote")))
            .bearer_auth(token)
            .send()
            .await?;
        decoded(resp).await.map(|_| ())
    }

    /// `PATCH /orders/status/{id}` — move an order along its lifecycle.
    pub async fn update_order_status(&self, token: &str, id: &str, status: OrderStatus) -> Result<(), ApiError> {
        let resp = self
            .http
            .patch(self.url(&format!("/orders/status/{id}")))
            .bearer_auth(token)
            .json(&serde_json::json!({ "status": status }))
            .send()
            .await?;
        decoded(resp).await.map(|_| ())
    }

    async fn post_json<B: Serialize + ?Sized>(&self, path: &str, token: &str, body: &B) -> Result<(), ApiError> {
        let resp = self
            .http
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        decoded(resp).await.map(|_| ())
    }

    async fn delete(&self, path: &str, token: &str) -> Result<(), ApiError> {
        let resp = self.http.delete(self.url(path)).bearer_auth(token).send().await?;
        decoded(resp).await.map(|_| ())
    }
}

/// Map a response to its JSON body, or to the error taxonomy.
async fn decoded(resp: reqwest::Response) -> Result<serde_json::Value, ApiError> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if !status.is_success() {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        return Err(ApiError::Backend { status: status.as_u16(), message: extract_message(&body) });
    }

    if body.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the `message` field out of a backend error body, falling back to
/// the raw text.
pub(crate) fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(serde_json::Value::as_str).map(str::to_owned))
        .unwrap_or_else(|| body.to_owned())
}

/// Unpack a listing envelope: rows under `key`, plus `total_record_count`.
pub(crate) fn parse_page<T: DeserializeOwned>(value: serde_json::Value, key: &str) -> Result<Page<T>, ApiError> {
    let total_record_count = value
        .get("total_record_count")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| ApiError::Decode("listing missing total_record_count".into()))?;

    let rows_value = value
        .get(key)
        .cloned()
        .ok_or_else(|| ApiError::Decode(format!("listing missing {key} rows")))?;
    let rows = serde_json::from_value(rows_value).map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(Page { rows, total_record_count })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
