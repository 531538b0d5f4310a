//! Free-shipping eligibility: store options, cart inputs, the shared engine, and its adapters.

pub mod cart;
pub(crate) mod engine;
pub mod payload;
pub mod presentation;
pub mod router;
pub mod service;
pub mod settings;
pub mod source;

#[cfg(test)]
mod tests;

pub use cart::{CartId, CartSnapshot, CartSource, CartSourceError, TotalsSegments};
pub use engine::{EligibilityEngine, EligibilityResult, ThresholdSource};
pub use payload::{CheckoutConfig, CheckoutPayload};
pub use presentation::{bar_width, IndicatorView, PriceFormat};
pub use router::{indicator_router, EvaluateRequest, RecomputeRequest};
pub use service::{IndicatorEvaluation, IndicatorService};
pub use settings::{DisplaySettings, EngineSettings, IndicatorOption, IndicatorSettings};
pub use source::{
    ConfigSource, ConfigSourceError, InMemoryConfigSource, StoreCode, StoreConfigView,
    StoreConfigImportError,
};
