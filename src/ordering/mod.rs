//! # Ordering
//!
//! The client side of order placement.
//!
//! ## Structure
//!
//! - [`coordinator`] - [`submit_order`] fans a cart out to the service and builds an [`OrderReport`]
//! - [`desk`] - [`OrderDesk`], the state holder behind the "make order" view
//! - [`error`] - [`OrderingError`] for user-facing failures
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use order_desk::api::mock::MockCatalogService;
//! use order_desk::model::{Product, ProductId};
//! use order_desk::ordering::OrderDesk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockCatalogService::new();
//!     mock.expect_list_products().return_ok(vec![
//!         Product::new(1, "Notebook", 15.0),
//!         Product::new(2, "Pen", 2.0),
//!     ]);
//!     mock.expect_create_order("Notebook").return_ok(());
//!
//!     let mut desk = OrderDesk::new(Arc::new(mock.clone()));
//!     desk.load().await;
//!     desk.set_quantity(ProductId(1), 2).unwrap();
//!     assert_eq!(desk.total_amount(), 30.0);
//!
//!     let report = desk.place_order().await;
//!     assert!(!report.has_failures());
//!     assert_eq!(desk.lines()[0].quantity(), 0);
//! }
//! ```

pub mod coordinator;
pub mod desk;
pub mod error;

pub use coordinator::*;
pub use desk::*;
pub use error::*;
