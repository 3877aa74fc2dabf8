//! # Catalog/Order Service Client
//!
//! Everything the desks know about the remote service goes through the
//! [`CatalogService`] trait. Two implementations ship with the crate:
//!
//! - [`HttpCatalogService`] - JSON over HTTP via `reqwest`, used by the binary.
//! - [`mock::MockCatalogService`] - scripted, in-memory, used by tests.
//!
//! Errors are reported as [`ApiError`], which separates transport failures
//! from replies the service rejected.

pub mod error;
pub mod http;
pub mod mock;
pub mod service;

pub use error::ApiError;
pub use http::HttpCatalogService;
pub use service::CatalogService;
