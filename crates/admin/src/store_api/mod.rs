//! Demo store REST API client.
//!
//! Thin JSON client over the public demo store API's three resource
//! collections: `users`, `products`, and `carts` (orders). Requests are
//! issued exactly once - no retries, no timeouts - and any non-success
//! status or transport error is reported uniformly as a failure so the
//! service facades can decide whether to fall back to local data.

pub mod types;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use storekeep_core::{OrderId, ProductId, UserId};

use crate::config::StoreApiConfig;

use types::{ApiCart, ApiCartInput, ApiProduct, ApiUser, ApiUserInput};

/// Errors that can occur when talking to the demo store API.
#[derive(Debug, Error)]
pub enum StoreApiError {
    /// Network-level failure or unreadable body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl StoreApiError {
    /// Whether this failure was the API reporting the resource absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

/// Client for the demo store REST API.
#[derive(Debug, Clone)]
pub struct StoreApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl StoreApiClient {
    /// Create a new client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &StoreApiConfig) -> Result<Self, StoreApiError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// List all users.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn list_users(&self) -> Result<Vec<ApiUser>, StoreApiError> {
        self.get_json(&format!("{}/users", self.base_url)).await
    }

    /// Fetch one user by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn get_user(&self, id: UserId) -> Result<ApiUser, StoreApiError> {
        self.get_json(&format!("{}/users/{id}", self.base_url)).await
    }

    /// Create a user. The API assigns the id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn create_user(&self, user: &ApiUserInput) -> Result<ApiUser, StoreApiError> {
        self.post_json(&format!("{}/users", self.base_url), user)
            .await
    }

    /// Replace a user's externally representable fields.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn update_user(
        &self,
        id: UserId,
        user: &ApiUserInput,
    ) -> Result<ApiUser, StoreApiError> {
        self.put_json(&format!("{}/users/{id}", self.base_url), user)
            .await
    }

    /// Delete a user.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn delete_user(&self, id: UserId) -> Result<(), StoreApiError> {
        self.delete(&format!("{}/users/{id}", self.base_url)).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn list_products(&self) -> Result<Vec<ApiProduct>, StoreApiError> {
        self.get_json(&format!("{}/products", self.base_url)).await
    }

    /// Fetch one product by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn get_product(&self, id: ProductId) -> Result<ApiProduct, StoreApiError> {
        self.get_json(&format!("{}/products/{id}", self.base_url))
            .await
    }

    // =========================================================================
    // Carts (orders)
    // =========================================================================

    /// List all carts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn list_carts(&self) -> Result<Vec<ApiCart>, StoreApiError> {
        self.get_json(&format!("{}/carts", self.base_url)).await
    }

    /// Fetch one cart by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn get_cart(&self, id: OrderId) -> Result<ApiCart, StoreApiError> {
        self.get_json(&format!("{}/carts/{id}", self.base_url)).await
    }

    /// List one user's carts.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn carts_for_user(&self, user_id: UserId) -> Result<Vec<ApiCart>, StoreApiError> {
        self.get_json(&format!("{}/carts/user/{user_id}", self.base_url))
            .await
    }

    /// Create a cart. The API assigns the id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn create_cart(&self, cart: &ApiCartInput) -> Result<ApiCart, StoreApiError> {
        self.post_json(&format!("{}/carts", self.base_url), cart)
            .await
    }

    /// Replace a cart.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn update_cart(
        &self,
        id: OrderId,
        cart: &ApiCartInput,
    ) -> Result<ApiCart, StoreApiError> {
        self.put_json(&format!("{}/carts/{id}", self.base_url), cart)
            .await
    }

    /// Delete a cart.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or non-success status.
    pub async fn delete_cart(&self, id: OrderId) -> Result<(), StoreApiError> {
        self.delete(&format!("{}/carts/{id}", self.base_url)).await
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, StoreApiError> {
        let response = self.client.get(url).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, StoreApiError> {
        let response = self.client.post(url).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, StoreApiError> {
        let response = self.client.put(url).json(body).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, url: &str) -> Result<(), StoreApiError> {
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Map any non-success status to an error carrying the body text.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_api_error_display() {
        let err = StoreApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_not_found_detection() {
        let not_found = StoreApiError::Api {
            status: 404,
            message: String::new(),
        };
        let server_error = StoreApiError::Api {
            status: 503,
            message: String::new(),
        };
        assert!(not_found.is_not_found());
        assert!(!server_error.is_not_found());
    }
}
