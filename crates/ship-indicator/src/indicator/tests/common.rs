use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::indicator::cart::{CartId, CartSnapshot, CartSource, CartSourceError};
use crate::indicator::engine::EligibilityEngine;
use crate::indicator::settings::{EngineSettings, IndicatorOption};
use crate::indicator::source::{ConfigSource, ConfigSourceError, InMemoryConfigSource, StoreCode};
use crate::indicator::{indicator_router, IndicatorService};

pub(super) fn custom_threshold(min_total: f64) -> EngineSettings {
    EngineSettings {
        enabled: true,
        use_core_shipping_threshold: false,
        custom_min_total: min_total,
        core_free_shipping_subtotal: 0.0,
        use_subtotal: false,
        subtotal_includes_discount: false,
    }
}

pub(super) fn engine_with(settings: EngineSettings) -> EligibilityEngine {
    EligibilityEngine::new(settings)
}

pub(super) fn cart(grand_total: f64, item_count: u32) -> CartSnapshot {
    CartSnapshot {
        grand_total,
        subtotal: grand_total,
        subtotal_with_discount: grand_total,
        item_count,
    }
}

pub(super) fn discounted_cart() -> CartSnapshot {
    CartSnapshot {
        grand_total: 85.0,
        subtotal: 80.0,
        subtotal_with_discount: 70.0,
        item_count: 3,
    }
}

pub(super) fn store() -> StoreCode {
    StoreCode::new("en_us")
}

pub(super) fn enabled_source(min_total: &str) -> InMemoryConfigSource {
    let mut source = InMemoryConfigSource::new();
    source.set_default(IndicatorOption::Enabled, "1");
    source.set_default(IndicatorOption::CustomMinTotal, min_total);
    source
}

pub(super) fn build_service(
    source: InMemoryConfigSource,
) -> (
    IndicatorService<InMemoryConfigSource, MemoryCarts>,
    Arc<MemoryCarts>,
) {
    let carts = Arc::new(MemoryCarts::default());
    let service = IndicatorService::new(Arc::new(source), carts.clone());
    (service, carts)
}

pub(super) fn router_for(source: InMemoryConfigSource) -> (axum::Router, Arc<MemoryCarts>) {
    let (service, carts) = build_service(source);
    (indicator_router(Arc::new(service)), carts)
}

#[derive(Default, Clone)]
pub(super) struct MemoryCarts {
    carts: Arc<Mutex<HashMap<CartId, CartSnapshot>>>,
}

impl MemoryCarts {
    pub(super) fn insert(&self, cart_id: &str, snapshot: CartSnapshot) {
        let mut guard = self.carts.lock().expect("cart mutex poisoned");
        guard.insert(CartId(cart_id.to_string()), snapshot);
    }
}

impl CartSource for MemoryCarts {
    fn snapshot(&self, cart_id: &CartId) -> Result<Option<CartSnapshot>, CartSourceError> {
        let guard = self.carts.lock().expect("cart mutex poisoned");
        Ok(guard.get(cart_id).copied())
    }
}

pub(super) struct UnavailableCarts;

impl CartSource for UnavailableCarts {
    fn snapshot(&self, _cart_id: &CartId) -> Result<Option<CartSnapshot>, CartSourceError> {
        Err(CartSourceError::Unavailable("session store offline".to_string()))
    }
}

pub(super) struct UnavailableConfig;

impl ConfigSource for UnavailableConfig {
    fn get(&self, _store: &StoreCode, _path: &str) -> Result<Option<String>, ConfigSourceError> {
        Err(ConfigSourceError::Unavailable(
            "scope config timed out".to_string(),
        ))
    }
}
