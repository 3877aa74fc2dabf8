use crate::api::{CatalogService, HttpCatalogService};
use crate::config::Config;
use crate::store::{PreferenceClient, PreferenceStore};
use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use tracing::{error, info};

const PREFS_BUFFER: usize = 32;

/// Running application: the service binding and the preference store task.
///
/// # Example
///
/// ```ignore
/// let app = App::start(Config::init()?)?;
///
/// let mut desk = OrderDesk::new(app.service.clone());
/// desk.load().await;
///
/// app.shutdown().await?;
/// ```
pub struct App {
    pub service: Arc<dyn CatalogService>,
    pub prefs: PreferenceClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl App {
    /// Builds the HTTP binding from `config` and spawns the preference store.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn start(config: Config) -> Result<Self> {
        let service = HttpCatalogService::new(&config.api_url, config.timeout)
            .with_context(|| format!("Invalid service url: {}", config.api_url))?;
        let (store, prefs) = PreferenceStore::open(&config.prefs_path, PREFS_BUFFER)
            .with_context(|| format!("Failed to open {}", config.prefs_path.display()))?;

        info!(api = %service.base_url(), "Application started");
        Ok(Self::with_parts(Arc::new(service), store, prefs))
    }

    /// Wires an already-built service and store, for tests and embedding.
    pub fn with_parts(
        service: Arc<dyn CatalogService>,
        store: PreferenceStore,
        prefs: PreferenceClient,
    ) -> Self {
        let handle = tokio::spawn(store.run());
        Self {
            service,
            prefs,
            handles: vec![handle],
        }
    }

    /// Drops the clients so the store sees its channel close, then waits for
    /// the store task to finish.
    ///
    /// Any [`PreferenceClient`] cloned out of the app keeps the store alive;
    /// drop those first.
    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down...");
        drop(self.prefs);
        drop(self.service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(anyhow!("Store task failed: {e}"));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
