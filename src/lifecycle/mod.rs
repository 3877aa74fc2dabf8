//! # Application Lifecycle
//!
//! Starting and stopping the pieces that outlive a single command: the HTTP
//! service binding and the preference store actor.
//!
//! [`App::start`] reads nothing itself; it takes a [`Config`](crate::config::Config),
//! builds the [`HttpCatalogService`](crate::api::HttpCatalogService), opens the
//! preference file and spawns the store task. [`App::shutdown`] drops the
//! clients, which closes the store's channel, then awaits the task so the last
//! write is on disk before the process exits.
//!
//! [`setup_tracing`] configures logging once per process.

pub mod app;
pub mod tracing;

pub use app::*;
pub use tracing::*;
