//! # Store Messages
//!
//! Requests the [`PreferenceClient`](crate::store::PreferenceClient) sends to the
//! [`PreferenceStore`](crate::store::PreferenceStore). Each carries a oneshot
//! sender for the reply.

use crate::store::StoreError;
use std::collections::BTreeMap;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest {
    Get {
        key: String,
        respond_to: Response<Option<String>>,
    },
    Set {
        entries: Vec<(String, String)>,
        respond_to: Response<()>,
    },
    Remove {
        key: String,
        respond_to: Response<bool>,
    },
    Snapshot {
        respond_to: Response<BTreeMap<String, String>>,
    },
}
