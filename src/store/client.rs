//! # Preference Client
//!
//! Cheap, cloneable handle to a running [`PreferenceStore`](crate::store::PreferenceStore).

use crate::store::{StoreError, StoreRequest};
use std::collections::BTreeMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Key under which the authenticated role is kept.
pub const USER_ROLE_KEY: &str = "user_role";

/// A type-safe client for interacting with a `PreferenceStore`.
///
/// Holds only a sender, so cloning is inexpensive. The store shuts down once
/// every clone has been dropped.
#[derive(Clone, Debug)]
pub struct PreferenceClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl PreferenceClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, StoreError>>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        debug!("Sending request");
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Get { key, respond_to })
            .await
    }

    #[instrument(skip(self, value))]
    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.set_many(vec![(key.to_string(), value.into())]).await
    }

    /// Writes several keys with a single save of the backing file.
    #[instrument(skip_all, fields(count = entries.len()))]
    pub async fn set_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        debug!("Sending request");
        self.request(|respond_to| StoreRequest::Set {
            entries,
            respond_to,
        })
        .await
    }

    /// Returns whether the key existed.
    #[instrument(skip(self))]
    pub async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        debug!("Sending request");
        let key = key.to_string();
        self.request(|respond_to| StoreRequest::Remove { key, respond_to })
            .await
    }

    pub async fn snapshot(&self) -> Result<BTreeMap<String, String>, StoreError> {
        self.request(|respond_to| StoreRequest::Snapshot { respond_to })
            .await
    }
}
