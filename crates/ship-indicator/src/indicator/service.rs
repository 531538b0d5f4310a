use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::cart::{CartId, CartSnapshot, CartSource, TotalsSegments};
use super::engine::{EligibilityEngine, EligibilityResult};
use super::payload::{CheckoutConfig, CheckoutPayload};
use super::presentation::{IndicatorView, PriceFormat};
use super::settings::IndicatorSettings;
use super::source::{ConfigSource, StoreCode, StoreConfigView};

/// Engine output paired with its rendered view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorEvaluation {
    pub result: EligibilityResult,
    pub view: IndicatorView,
}

/// Service composing the configuration source, cart source, and eligibility engine.
///
/// Nothing here fails: unavailable configuration or carts degrade to the inert indicator.
pub struct IndicatorService<C, K> {
    config: Arc<C>,
    carts: Arc<K>,
    price_format: PriceFormat,
}

impl<C, K> IndicatorService<C, K>
where
    C: ConfigSource + 'static,
    K: CartSource + 'static,
{
    pub fn new(config: Arc<C>, carts: Arc<K>) -> Self {
        Self {
            config,
            carts,
            price_format: PriceFormat::default(),
        }
    }

    pub fn with_price_format(mut self, price_format: PriceFormat) -> Self {
        self.price_format = price_format;
        self
    }

    pub fn price_format(&self) -> &PriceFormat {
        &self.price_format
    }

    /// Resolve and default every option for `store`.
    pub fn settings(&self, store: &StoreCode) -> IndicatorSettings {
        let view = StoreConfigView::new(&*self.config, store.clone());
        IndicatorSettings::resolve(&view)
    }

    /// Payload for the checkout widget.
    pub fn checkout_config(&self, store: &StoreCode) -> CheckoutConfig {
        CheckoutPayload::from_settings(&self.settings(store)).into_config()
    }

    /// Server-side evaluation against a snapshot the caller already holds.
    pub fn evaluate(&self, store: &StoreCode, cart: Option<&CartSnapshot>) -> IndicatorEvaluation {
        let settings = self.settings(store);
        let engine = EligibilityEngine::new(settings.engine);
        let result = engine.evaluate(cart);
        let view = IndicatorView::render(&settings.display, &result, &self.price_format);

        info!(
            store = %store,
            enabled = result.enabled,
            eligible = result.eligible,
            "indicator rendered"
        );

        IndicatorEvaluation { result, view }
    }

    /// Evaluation for a cart held by the cart source; a failed lookup reads as an empty cart.
    pub fn evaluate_cart(&self, store: &StoreCode, cart_id: &CartId) -> IndicatorEvaluation {
        let snapshot = match self.carts.snapshot(cart_id) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%cart_id, error = %err, "cart lookup failed; treating cart as empty");
                None
            }
        };

        self.evaluate(store, snapshot.as_ref())
    }

    /// Widget-side recomputation from a payload and live totals.
    pub fn recompute(
        &self,
        payload: &CheckoutPayload,
        totals: Option<&TotalsSegments>,
    ) -> IndicatorEvaluation {
        let (result, view) = IndicatorView::recompute(payload, totals, &self.price_format);
        IndicatorEvaluation { result, view }
    }
}
