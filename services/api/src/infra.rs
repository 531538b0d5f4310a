use metrics_exporter_prometheus::PrometheusHandle;
use ship_indicator::error::AppError;
use ship_indicator::indicator::{
    CartId, CartSnapshot, CartSource, CartSourceError, InMemoryConfigSource,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) carts: Arc<InMemoryCartSource>,
}

/// Cart snapshots pushed by the storefront session layer.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCartSource {
    carts: Arc<Mutex<HashMap<CartId, CartSnapshot>>>,
}

impl InMemoryCartSource {
    pub(crate) fn upsert(&self, cart_id: CartId, snapshot: CartSnapshot) {
        let mut guard = self.carts.lock().expect("cart mutex poisoned");
        guard.insert(cart_id, snapshot);
    }
}

impl CartSource for InMemoryCartSource {
    fn snapshot(&self, cart_id: &CartId) -> Result<Option<CartSnapshot>, CartSourceError> {
        let guard = self
            .carts
            .lock()
            .map_err(|_| CartSourceError::Unavailable("cart mutex poisoned".to_string()))?;
        Ok(guard.get(cart_id).copied())
    }
}

/// Loads the store configuration export, or an empty source that leaves the indicator disabled.
pub(crate) fn load_config_source(path: Option<&Path>) -> Result<InMemoryConfigSource, AppError> {
    match path {
        Some(path) => {
            let source = InMemoryConfigSource::from_path(path)?;
            info!(path = %path.display(), stores = source.stores().count(), "store configuration loaded");
            Ok(source)
        }
        None => {
            warn!("no store configuration supplied; indicator stays disabled for every store");
            Ok(InMemoryConfigSource::new())
        }
    }
}
