//! # CatalogService Trait
//!
//! The seam between the desks and whatever answers catalog/order requests.
//! Production code uses [`HttpCatalogService`](crate::api::HttpCatalogService);
//! tests use [`MockCatalogService`](crate::api::mock::MockCatalogService).
use crate::api::ApiError;
use crate::model::{
    Credentials, LoginReply, NewProduct, OrderId, OrderRecord, OrderRequest, Product, ProductId,
    ProductPatch, Role,
};
use async_trait::async_trait;

/// Remote operations of the ordering/inventory service.
///
/// Every method is a single request with no retries. Implementations must be
/// shareable across tasks: the order coordinator calls `create_order` from
/// several Tokio tasks at once.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Authenticate with the endpoint matching `role`.
    async fn login(&self, role: Role, credentials: &Credentials) -> Result<LoginReply, ApiError>;

    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError>;

    async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> Result<(), ApiError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError>;

    async fn create_order(&self, order: &OrderRequest) -> Result<(), ApiError>;

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, ApiError>;

    /// Mark an order as delivered.
    async fn update_order_status(&self, id: OrderId) -> Result<(), ApiError>;
}
