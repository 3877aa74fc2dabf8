//! # Mock Service & Testing Guide
//!
//! [`MockCatalogService`] implements [`CatalogService`] entirely in memory. You
//! queue the replies each operation should give, hand the mock to the code under
//! test, and afterwards check what was called and that every queued reply was
//! consumed.
//!
//! | Feature | MockCatalogService | HttpCatalogService |
//! |---------|--------------------|--------------------|
//! | **Speed** | Instant (in-memory) | Network round trip |
//! | **Determinism** | Replies are scripted | Depends on the server |
//! | **Error Injection** | `return_err` | Needs a misbehaving server |
//!
//! ```rust
//! use order_desk::api::mock::MockCatalogService;
//! use order_desk::api::{ApiError, CatalogService};
//! use order_desk::model::{OrderRequest, Product};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockCatalogService::new();
//!     mock.expect_list_products()
//!         .return_ok(vec![Product::new(1, "Notebook", 15.0)]);
//!     mock.expect_create_order("Notebook").return_err(ApiError::Transport("refused".into()));
//!
//!     let products = mock.list_products().await.unwrap();
//!     assert_eq!(products.len(), 1);
//!     let result = mock.create_order(&OrderRequest::new("Notebook", 2, 15.0)).await;
//!     assert!(result.is_err());
//!
//!     mock.verify();
//! }
//! ```
//!
//! `create_order` replies are keyed by product name rather than queued in call
//! order, because the order coordinator submits lines concurrently and the
//! arrival order is up to the scheduler.
//!
//! A call with no queued reply panics, like an unexpected request on a real
//! mock. Inside a spawned task that panic surfaces as a failed join.

use crate::api::{ApiError, CatalogService};
use crate::model::{
    Credentials, LoginReply, NewProduct, OrderId, OrderRecord, OrderRequest, Product, ProductId,
    ProductPatch, Role,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::{Arc, Mutex};

type Replies<T> = Arc<Mutex<VecDeque<Result<T, ApiError>>>>;
type KeyedReplies<K, T> = Arc<Mutex<HashMap<K, VecDeque<Result<T, ApiError>>>>>;

/// A call observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Login(Role, String),
    ListProducts,
    CreateProduct(NewProduct),
    UpdateProduct(ProductId, ProductPatch),
    DeleteProduct(ProductId),
    CreateOrder(OrderRequest),
    ListOrders,
    UpdateOrderStatus(OrderId),
}

/// In-memory [`CatalogService`] with scripted replies.
///
/// Cloning shares the script and the call log, so a test can keep one handle
/// and give another to the code under test.
#[derive(Clone, Default)]
pub struct MockCatalogService {
    login: Replies<LoginReply>,
    list_products: Replies<Vec<Product>>,
    create_product: Replies<()>,
    update_product: KeyedReplies<ProductId, ()>,
    delete_product: KeyedReplies<ProductId, ()>,
    create_order: KeyedReplies<String, ()>,
    list_orders: Replies<Vec<OrderRecord>>,
    update_order_status: KeyedReplies<OrderId, ()>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockCatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_login(&self) -> ExpectationBuilder<LoginReply> {
        ExpectationBuilder::new(&self.login)
    }

    pub fn expect_list_products(&self) -> ExpectationBuilder<Vec<Product>> {
        ExpectationBuilder::new(&self.list_products)
    }

    pub fn expect_create_product(&self) -> ExpectationBuilder<()> {
        ExpectationBuilder::new(&self.create_product)
    }

    pub fn expect_update_product(&self, id: ProductId) -> KeyedExpectationBuilder<ProductId, ()> {
        KeyedExpectationBuilder::new(&self.update_product, id)
    }

    pub fn expect_delete_product(&self, id: ProductId) -> KeyedExpectationBuilder<ProductId, ()> {
        KeyedExpectationBuilder::new(&self.delete_product, id)
    }

    /// Expects one `create_order` for the named product.
    pub fn expect_create_order(
        &self,
        product: impl Into<String>,
    ) -> KeyedExpectationBuilder<String, ()> {
        KeyedExpectationBuilder::new(&self.create_order, product.into())
    }

    pub fn expect_list_orders(&self) -> ExpectationBuilder<Vec<OrderRecord>> {
        ExpectationBuilder::new(&self.list_orders)
    }

    pub fn expect_update_order_status(&self, id: OrderId) -> KeyedExpectationBuilder<OrderId, ()> {
        KeyedExpectationBuilder::new(&self.update_order_status, id)
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The order payloads received so far.
    pub fn orders_received(&self) -> Vec<OrderRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MockCall::CreateOrder(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = pending(&self.login)
            + pending(&self.list_products)
            + pending(&self.create_product)
            + pending_keyed(&self.update_product)
            + pending_keyed(&self.delete_product)
            + pending_keyed(&self.create_order)
            + pending(&self.list_orders)
            + pending_keyed(&self.update_order_status);
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }
}

fn pending<T>(replies: &Replies<T>) -> usize {
    replies.lock().unwrap().len()
}

fn pending_keyed<K, T>(replies: &KeyedReplies<K, T>) -> usize {
    replies.lock().unwrap().values().map(VecDeque::len).sum()
}

fn next<T>(replies: &Replies<T>, what: &str) -> Result<T, ApiError> {
    let reply = replies.lock().unwrap().pop_front();
    match reply {
        Some(reply) => reply,
        None => panic!("Unexpected call: {what}"),
    }
}

fn next_keyed<K, T>(replies: &KeyedReplies<K, T>, key: &K, what: &str) -> Result<T, ApiError>
where
    K: Eq + Hash + std::fmt::Debug,
{
    let reply = replies
        .lock()
        .unwrap()
        .get_mut(key)
        .and_then(VecDeque::pop_front);
    match reply {
        Some(reply) => reply,
        None => panic!("Unexpected call: {what} {key:?}"),
    }
}

/// Builder for queued expectations.
pub struct ExpectationBuilder<T> {
    replies: Replies<T>,
}

impl<T> ExpectationBuilder<T> {
    fn new(replies: &Replies<T>) -> Self {
        Self {
            replies: replies.clone(),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.replies.lock().unwrap().push_back(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }
}

/// Builder for expectations matched by key.
pub struct KeyedExpectationBuilder<K, T> {
    replies: KeyedReplies<K, T>,
    key: K,
}

impl<K: Eq + Hash, T> KeyedExpectationBuilder<K, T> {
    fn new(replies: &KeyedReplies<K, T>, key: K) -> Self {
        Self {
            replies: replies.clone(),
            key,
        }
    }

    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, reply: Result<T, ApiError>) {
        self.replies
            .lock()
            .unwrap()
            .entry(self.key)
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl CatalogService for MockCatalogService {
    async fn login(&self, role: Role, credentials: &Credentials) -> Result<LoginReply, ApiError> {
        self.record(MockCall::Login(role, credentials.email.clone()));
        next(&self.login, "login")
    }

    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.record(MockCall::ListProducts);
        next(&self.list_products, "list_products")
    }

    async fn create_product(&self, product: &NewProduct) -> Result<(), ApiError> {
        self.record(MockCall::CreateProduct(product.clone()));
        next(&self.create_product, "create_product")
    }

    async fn update_product(&self, id: ProductId, patch: &ProductPatch) -> Result<(), ApiError> {
        self.record(MockCall::UpdateProduct(id, patch.clone()));
        next_keyed(&self.update_product, &id, "update_product")
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        self.record(MockCall::DeleteProduct(id));
        next_keyed(&self.delete_product, &id, "delete_product")
    }

    async fn create_order(&self, order: &OrderRequest) -> Result<(), ApiError> {
        self.record(MockCall::CreateOrder(order.clone()));
        next_keyed(&self.create_order, &order.product, "create_order")
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, ApiError> {
        self.record(MockCall::ListOrders);
        next(&self.list_orders, "list_orders")
    }

    async fn update_order_status(&self, id: OrderId) -> Result<(), ApiError> {
        self.record(MockCall::UpdateOrderStatus(id));
        next_keyed(&self.update_order_status, &id, "update_order_status")
    }
}
