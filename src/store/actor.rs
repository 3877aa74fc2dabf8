//! # Preference Store Actor
//!
//! The `PreferenceStore` owns the key-value map and, optionally, the JSON file
//! that backs it. It processes requests one at a time in its own Tokio task, so
//! the map needs no lock and writes to the file never interleave.

use crate::store::{PreferenceClient, StoreError, StoreRequest};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of the preference store.
///
/// # Usage Pattern
///
/// 1.  **Open**: [`PreferenceStore::open`] (file-backed) or
///     [`PreferenceStore::in_memory`] returns the store and a client.
/// 2.  **Run**: spawn `store.run()` on the runtime.
/// 3.  **Use**: clone the client wherever preferences are needed.
///
/// ```rust
/// use order_desk::store::PreferenceStore;
///
/// #[tokio::main]
/// async fn main() {
///     let (store, prefs) = PreferenceStore::in_memory(8);
///     let handle = tokio::spawn(store.run());
///
///     prefs.set("user_role", "admin").await.unwrap();
///     assert_eq!(prefs.get("user_role").await.unwrap().as_deref(), Some("admin"));
///
///     drop(prefs);
///     handle.await.unwrap();
/// }
/// ```
///
/// A mutation is only kept if the file write succeeds; on failure the map is
/// rolled back and the caller gets [`StoreError::Io`].
pub struct PreferenceStore {
    receiver: mpsc::Receiver<StoreRequest>,
    entries: BTreeMap<String, String>,
    path: Option<PathBuf>,
}

impl PreferenceStore {
    /// Opens a store backed by the JSON file at `path`. A missing file starts
    /// an empty store; it is created on the first write.
    pub fn open(
        path: impl Into<PathBuf>,
        buffer_size: usize,
    ) -> Result<(Self, PreferenceClient), StoreError> {
        let path = path.into();
        let entries = load(&path)?;
        info!(path = %path.display(), size = entries.len(), "Preferences loaded");
        Ok(Self::with_entries(entries, Some(path), buffer_size))
    }

    /// A store that lives only as long as the process.
    pub fn in_memory(buffer_size: usize) -> (Self, PreferenceClient) {
        Self::with_entries(BTreeMap::new(), None, buffer_size)
    }

    fn with_entries(
        entries: BTreeMap<String, String>,
        path: Option<PathBuf>,
        buffer_size: usize,
    ) -> (Self, PreferenceClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            entries,
            path,
        };
        (store, PreferenceClient::new(sender))
    }

    /// Processes requests until every client is dropped.
    pub async fn run(mut self) {
        info!(size = self.entries.len(), "Preference store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Get { key, respond_to } => {
                    let value = self.entries.get(&key).cloned();
                    debug!(%key, found = value.is_some(), "Get");
                    let _ = respond_to.send(Ok(value));
                }
                StoreRequest::Set {
                    entries,
                    respond_to,
                } => {
                    let previous: Vec<(String, Option<String>)> = entries
                        .into_iter()
                        .map(|(key, value)| {
                            let old = self.entries.insert(key.clone(), value);
                            (key, old)
                        })
                        .collect();
                    let result = self.persist().await;
                    match &result {
                        Ok(()) => debug!(count = previous.len(), "Set"),
                        Err(e) => {
                            warn!(error = %e, "Set failed, rolling back");
                            self.restore(previous);
                        }
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Remove { key, respond_to } => {
                    let Some(old) = self.entries.remove(&key) else {
                        debug!(%key, existed = false, "Remove");
                        let _ = respond_to.send(Ok(false));
                        continue;
                    };
                    let result = self.persist().await;
                    if let Err(e) = &result {
                        warn!(%key, error = %e, "Remove failed, rolling back");
                        self.entries.insert(key.clone(), old);
                    }
                    debug!(%key, existed = true, "Remove");
                    let _ = respond_to.send(result.map(|()| true));
                }
                StoreRequest::Snapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.entries.clone()));
                }
            }
        }

        info!(size = self.entries.len(), "Shutdown");
    }

    fn restore(&mut self, previous: Vec<(String, Option<String>)>) {
        for (key, old) in previous.into_iter().rev() {
            match old {
                Some(value) => self.entries.insert(key, value),
                None => self.entries.remove(&key),
            };
        }
    }

    /// Writes the map to a sibling temp file, then renames it over the target.
    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let body = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let tmp = temp_path(path);
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn load(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(BTreeMap::new()),
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}
