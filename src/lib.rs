//! # Order Desk
//!
//! > **A small ordering client for a product catalog service.**
//!
//! Clients browse the catalog, pick quantities and place an order; every
//! selected product becomes its own order request, all submitted at once.
//! Administrators maintain the catalog, review orders and mark them
//! delivered. The remote service speaks JSON over HTTP.
//!
//! ## 🏗️ Design
//!
//! ### One seam to the outside world
//! All remote calls go through the [`api::CatalogService`] trait. The binary
//! uses [`api::HttpCatalogService`]; tests script [`api::mock::MockCatalogService`].
//! Nothing above the `api` layer knows about URLs or status codes.
//!
//! ### State holders instead of views
//! Each screen of the app is a plain struct that owns its data and exposes
//! `is_loading`, `error` and (where it applies) a status text:
//! [`login::LoginForm`], [`ordering::OrderDesk`], [`catalog::CatalogDesk`],
//! [`orders::OrderBoard`]. The CLI drives them one command at a time.
//!
//! ### Concurrent submission, deterministic report
//! [`ordering::submit_order`] spawns one Tokio task per cart line, then awaits
//! the handles in cart order. Outcomes come back through the handles, so
//! there is no shared result list to lock, and the report always lists lines
//! in the order the user saw them. Lines that were placed reset to zero;
//! failed lines keep their quantity for another try.
//!
//! ### Preferences as an actor
//! The session role and the settings live in a JSON file owned by a
//! [`store::PreferenceStore`] task. Callers hold cheap
//! [`store::PreferenceClient`] clones and talk to it over a channel, so file
//! writes never interleave.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`] - wire DTOs (`Product`, `OrderRequest`, `OrderRecord`) and the cart.
//! - [`api`] - the service trait, its HTTP binding and its mock.
//! - [`ordering`] - cart submission and the order desk.
//! - [`catalog`] - product administration.
//! - [`orders`] - order review and delivery.
//! - [`login`] - credentials, role selection, session.
//! - [`settings`] - persisted user preferences.
//! - [`store`] - the preference store actor.
//! - [`config`] / [`lifecycle`] - environment, startup, shutdown, logging.
//!
//! ## 🧪 Testing
//!
//! Unit tests sit next to the code they cover. `tests/` holds end-to-end flows
//! against the mock and an HTTP test that runs the real binding against an
//! in-process `axum` stub.

pub mod api;
pub mod catalog;
pub mod config;
pub mod lifecycle;
pub mod login;
pub mod model;
pub mod ordering;
pub mod orders;
pub mod settings;
pub mod store;
