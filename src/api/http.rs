//! # HTTP Binding
//!
//! [`HttpCatalogService`] speaks JSON over HTTP with `reqwest`. Paths are
//! resolved against the configured base URL, so a base of
//! `https://shop.example/api/` turns `orders/3` into
//! `https://shop.example/api/orders/3`.
use crate::api::{ApiError, CatalogService};
use crate::model::{
    Credentials, LoginReply, NewProduct, OrderId, OrderRecord, OrderRequest, Product, ProductId,
    ProductPatch, Role,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Catalog/order service reached over HTTP.
#[derive(Clone, Debug)]
pub struct HttpCatalogService {
    base: Url,
    client: Client,
}

impl HttpCatalogService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!("{base_url}: not a base url")));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("http client setup failed: {e}")))?;
        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Send and turn any non-2xx reply into [`ApiError::Rejected`].
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Reply");
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %body, "Rejected");
        Err(ApiError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn login(&self, role: Role, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        let path = match role {
            Role::Admin => "login",
            Role::Client => "login-client",
        };
        let url = self.endpoint(path)?;
        debug!(%url, "Sending request");
        self.send_json(self.client.post(url).json(credentials)).await
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = self.endpoint("products")?;
        debug!(%url, "Sending request");
        let products: Vec<Product> = self.send_json(self.client.get(url)).await?;
        info!(count = products.len(), "Products fetched");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError> {
        let url = self.endpoint("products")?;
        debug!(%url, "Sending request");
        self.send(self.client.post(url).json(product)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("products/{}", id.0))?;
        debug!(%url, "Sending request");
        self.send(self.client.put(url).json(patch)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("products/{}", id.0))?;
        debug!(%url, "Sending request");
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(product = %order.product))]
    async fn create_order(&self, order: &OrderRequest) -> Result<(), ApiError> {
        let url = self.endpoint("orders")?;
        debug!(%url, ?order, "Sending request");
        self.send(self.client.post(url).json(order)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, ApiError> {
        let url = self.endpoint("orders")?;
        debug!(%url, "Sending request");
        let orders: Vec<OrderRecord> = self.send_json(self.client.get(url)).await?;
        info!(count = orders.len(), "Orders fetched");
        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn update_order_status(&self, id: OrderId) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("orders/{}", id.0))?;
        debug!(%url, "Sending request");
        self.send(self.client.put(url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(base: &str) -> HttpCatalogService {
        HttpCatalogService::new(base, Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let svc = service("http://localhost:8080/api");
        assert_eq!(svc.base_url().as_str(), "http://localhost:8080/api/");
        assert_eq!(
            svc.endpoint("orders/3").unwrap().as_str(),
            "http://localhost:8080/api/orders/3"
        );
    }

    #[test]
    fn test_root_base_url() {
        let svc = service("http://localhost:8080");
        assert_eq!(
            svc.endpoint("login-client").unwrap().as_str(),
            "http://localhost:8080/login-client"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = HttpCatalogService::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        let err = HttpCatalogService::new("mailto:shop@example.com", Duration::from_secs(1))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let svc = service("http://127.0.0.1:9/");
        let err = svc.list_products().await.unwrap_err();
        assert!(err.is_network(), "unexpected error: {err:?}");
    }
}
