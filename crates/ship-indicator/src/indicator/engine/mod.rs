mod rules;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cart::CartSnapshot;
use super::payload::CheckoutPayload;
use super::settings::EngineSettings;

/// Where the active threshold was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdSource {
    Custom,
    CoreCarrier,
    Disabled,
}

impl ThresholdSource {
    pub fn label(self) -> &'static str {
        match self {
            ThresholdSource::Custom => "custom",
            ThresholdSource::CoreCarrier => "core_carrier",
            ThresholdSource::Disabled => "disabled",
        }
    }
}

/// Derived eligibility figures. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub enabled: bool,
    pub threshold: f64,
    pub current_total: f64,
    pub eligible: bool,
    pub remaining: f64,
    pub completion_rate: f64,
}

impl EligibilityResult {
    pub fn inert() -> Self {
        Self {
            enabled: false,
            threshold: 0.0,
            current_total: 0.0,
            eligible: false,
            remaining: 0.0,
            completion_rate: 0.0,
        }
    }
}

/// Stateless evaluator shared by the server-rendered block and the checkout widget.
///
/// Every operation is gated on `enabled`: a disabled engine reports a zero threshold, zero
/// total, no eligibility, and zero progress whatever the cart holds.
#[derive(Debug, Clone, Default)]
pub struct EligibilityEngine {
    settings: EngineSettings,
}

impl EligibilityEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    /// Rebuilds the engine from the payload handed to the checkout widget. The payload carries
    /// an already-resolved threshold, so it is treated as the module's own minimum.
    pub fn from_payload(payload: &CheckoutPayload) -> Self {
        if !payload.enabled {
            return Self::default();
        }

        Self::new(EngineSettings {
            enabled: true,
            use_core_shipping_threshold: false,
            custom_min_total: payload.threshold.unwrap_or(0.0),
            core_free_shipping_subtotal: 0.0,
            use_subtotal: payload.use_subtotal.unwrap_or(false),
            subtotal_includes_discount: payload.include_discount.unwrap_or(false),
        })
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn threshold_source(&self) -> ThresholdSource {
        rules::select_threshold(&self.settings).1
    }

    pub fn resolve_threshold(&self) -> f64 {
        rules::select_threshold(&self.settings).0
    }

    pub fn resolve_current_total(&self, snapshot: Option<&CartSnapshot>) -> f64 {
        rules::select_total(&self.settings, snapshot)
    }

    /// Reaching the threshold exactly counts as eligible.
    pub fn is_eligible(&self, snapshot: Option<&CartSnapshot>) -> bool {
        let has_items = snapshot.map(CartSnapshot::has_items).unwrap_or(false);
        self.is_enabled()
            && has_items
            && self.resolve_current_total(snapshot) >= self.resolve_threshold()
    }

    pub fn remaining_amount(&self, snapshot: Option<&CartSnapshot>) -> f64 {
        rules::shortfall(
            self.resolve_threshold(),
            self.resolve_current_total(snapshot),
        )
    }

    pub fn completion_rate(&self, snapshot: Option<&CartSnapshot>) -> f64 {
        rules::progress_pct(
            self.resolve_current_total(snapshot),
            self.resolve_threshold(),
        )
    }

    pub fn evaluate(&self, snapshot: Option<&CartSnapshot>) -> EligibilityResult {
        if !self.is_enabled() {
            return EligibilityResult::inert();
        }

        let result = EligibilityResult {
            enabled: true,
            threshold: self.resolve_threshold(),
            current_total: self.resolve_current_total(snapshot),
            eligible: self.is_eligible(snapshot),
            remaining: self.remaining_amount(snapshot),
            completion_rate: self.completion_rate(snapshot),
        };

        debug!(
            threshold = result.threshold,
            threshold_source = self.threshold_source().label(),
            current_total = result.current_total,
            eligible = result.eligible,
            completion_rate = result.completion_rate,
            "free shipping eligibility evaluated"
        );

        result
    }
}
