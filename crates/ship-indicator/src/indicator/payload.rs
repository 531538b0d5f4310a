use serde::{Deserialize, Serialize};

use super::engine::EligibilityEngine;
use super::settings::IndicatorSettings;

/// Envelope the storefront merges into its checkout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(rename = "shipIndicator")]
    pub ship_indicator: CheckoutPayload,
}

/// Flat configuration handed from the server to the checkout widget.
///
/// A disabled store serializes as `{"enabled": false}` and nothing else.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_subtotal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_discount: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_msg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
}

impl CheckoutPayload {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &IndicatorSettings) -> Self {
        let engine = EligibilityEngine::new(settings.engine);
        if !engine.is_enabled() {
            return Self::disabled();
        }

        let display = &settings.display;
        Self {
            enabled: true,
            threshold: Some(engine.resolve_threshold()),
            use_subtotal: Some(settings.engine.use_subtotal),
            include_discount: Some(settings.engine.subtotal_includes_discount),
            msg_text: Some(display.text_message.clone()),
            success_msg: Some(display.eligible_text_message.clone()),
            font_size: Some(display.font_size.clone()),
            text_color: Some(display.message_text_color.clone()),
            bg_color: Some(display.message_background.clone()),
            bar_color: Some(display.progress_bar_color.clone()),
            custom_css: Some(display.custom_css.clone()),
        }
    }

    pub fn into_config(self) -> CheckoutConfig {
        CheckoutConfig {
            ship_indicator: self,
        }
    }
}
