//! # Preference Store
//!
//! Persisted key-value settings (the logged-in role, display preferences,
//! usage counters) kept in a small JSON file.
//!
//! The store follows the actor pattern: a [`PreferenceStore`] task owns the map
//! and the file, and any number of [`PreferenceClient`] clones talk to it over
//! a channel. Requests are handled strictly in arrival order.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::PreferenceStore;
pub use client::{PreferenceClient, USER_ROLE_KEY};
pub use error::StoreError;
pub use message::{Response, StoreRequest};
