use serde::{Deserialize, Serialize};

use super::payload::CheckoutPayload;
use super::source::StoreConfigView;

pub const DEFAULT_FONT_SIZE: &str = "14";
pub const DEFAULT_TEXT_MESSAGE: &str = "To get FREE SHIPPING, add ";
pub const DEFAULT_ELIGIBLE_TEXT_MESSAGE: &str = "Your order is eligible for FREE SHIPPING.";
pub const DEFAULT_MESSAGE_BACKGROUND: &str = "#ff5501";
pub const DEFAULT_PROGRESS_BAR_COLOR: &str = "#00a651";
pub const DEFAULT_MESSAGE_TEXT_COLOR: &str = "#ffffff";
pub const DEFAULT_CUSTOM_CSS: &str = "";

/// Every store option the indicator reads, keyed by configuration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IndicatorOption {
    Enabled,
    UseCoreShippingThreshold,
    CustomMinTotal,
    CoreFreeShippingSubtotal,
    UseSubtotal,
    SubtotalIncludesDiscount,
    FontSize,
    TextMessage,
    EligibleTextMessage,
    MessageBackground,
    ProgressBarColor,
    MessageTextColor,
    CustomCss,
}

impl IndicatorOption {
    pub const ALL: [IndicatorOption; 13] = [
        IndicatorOption::Enabled,
        IndicatorOption::UseCoreShippingThreshold,
        IndicatorOption::CustomMinTotal,
        IndicatorOption::CoreFreeShippingSubtotal,
        IndicatorOption::UseSubtotal,
        IndicatorOption::SubtotalIncludesDiscount,
        IndicatorOption::FontSize,
        IndicatorOption::TextMessage,
        IndicatorOption::EligibleTextMessage,
        IndicatorOption::MessageBackground,
        IndicatorOption::ProgressBarColor,
        IndicatorOption::MessageTextColor,
        IndicatorOption::CustomCss,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IndicatorOption::Enabled => "enabled",
            IndicatorOption::UseCoreShippingThreshold => "useCoreShippingThreshold",
            IndicatorOption::CustomMinTotal => "customMinTotal",
            IndicatorOption::CoreFreeShippingSubtotal => "coreFreeShippingSubtotal",
            IndicatorOption::UseSubtotal => "useSubtotal",
            IndicatorOption::SubtotalIncludesDiscount => "subtotalIncludesDiscount",
            IndicatorOption::FontSize => "fontSize",
            IndicatorOption::TextMessage => "textMessage",
            IndicatorOption::EligibleTextMessage => "eligibleTextMessage",
            IndicatorOption::MessageBackground => "messageBackground",
            IndicatorOption::ProgressBarColor => "progressBarColor",
            IndicatorOption::MessageTextColor => "messageTextColor",
            IndicatorOption::CustomCss => "customCss",
        }
    }

    /// Store configuration path. The core threshold lives under the free-shipping carrier.
    pub fn path(self) -> &'static str {
        match self {
            IndicatorOption::Enabled => "ship_indicator/general/is_enable",
            IndicatorOption::UseCoreShippingThreshold => {
                "ship_indicator/general/use_core_freeshipping_config"
            }
            IndicatorOption::CustomMinTotal => "ship_indicator/general/order_min_total",
            IndicatorOption::CoreFreeShippingSubtotal => {
                "carriers/freeshipping/free_shipping_subtotal"
            }
            IndicatorOption::UseSubtotal => "ship_indicator/general/use_order_subtotal",
            IndicatorOption::SubtotalIncludesDiscount => {
                "ship_indicator/general/order_subtotal_includes_discount"
            }
            IndicatorOption::FontSize => "ship_indicator/customization/font_size",
            IndicatorOption::TextMessage => "ship_indicator/customization/text_message",
            IndicatorOption::EligibleTextMessage => {
                "ship_indicator/customization/eligible_text_message"
            }
            IndicatorOption::MessageBackground => {
                "ship_indicator/customization/message_background"
            }
            IndicatorOption::ProgressBarColor => "ship_indicator/customization/progress_bar_color",
            IndicatorOption::MessageTextColor => "ship_indicator/customization/message_text_color",
            IndicatorOption::CustomCss => "ship_indicator/customization/custom_css",
        }
    }

    /// Accepts either the option name or its configuration path.
    pub fn lookup(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|option| option.name() == key || option.path() == key)
    }
}

/// Inputs the eligibility rules depend on. `Default` is the inert (disabled) configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSettings {
    pub enabled: bool,
    pub use_core_shipping_threshold: bool,
    pub custom_min_total: f64,
    pub core_free_shipping_subtotal: f64,
    pub use_subtotal: bool,
    pub subtotal_includes_discount: bool,
}

impl EngineSettings {
    pub fn resolve(view: &StoreConfigView<'_>) -> Self {
        Self {
            enabled: parse_flag(view.get(IndicatorOption::Enabled).as_deref()),
            use_core_shipping_threshold: parse_flag(
                view.get(IndicatorOption::UseCoreShippingThreshold)
                    .as_deref(),
            ),
            custom_min_total: parse_amount(view.get(IndicatorOption::CustomMinTotal).as_deref()),
            core_free_shipping_subtotal: parse_amount(
                view.get(IndicatorOption::CoreFreeShippingSubtotal)
                    .as_deref(),
            ),
            use_subtotal: parse_flag(view.get(IndicatorOption::UseSubtotal).as_deref()),
            subtotal_includes_discount: parse_flag(
                view.get(IndicatorOption::SubtotalIncludesDiscount)
                    .as_deref(),
            ),
        }
    }
}

/// Presentation strings, each already defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySettings {
    pub font_size: String,
    pub text_message: String,
    pub eligible_text_message: String,
    pub message_background: String,
    pub progress_bar_color: String,
    pub message_text_color: String,
    pub custom_css: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE.to_string(),
            text_message: DEFAULT_TEXT_MESSAGE.to_string(),
            eligible_text_message: DEFAULT_ELIGIBLE_TEXT_MESSAGE.to_string(),
            message_background: DEFAULT_MESSAGE_BACKGROUND.to_string(),
            progress_bar_color: DEFAULT_PROGRESS_BAR_COLOR.to_string(),
            message_text_color: DEFAULT_MESSAGE_TEXT_COLOR.to_string(),
            custom_css: DEFAULT_CUSTOM_CSS.to_string(),
        }
    }
}

impl DisplaySettings {
    pub fn resolve(view: &StoreConfigView<'_>) -> Self {
        let text = |option, default: &str| {
            view.get(option).unwrap_or_else(|| default.to_string())
        };

        Self {
            font_size: text(IndicatorOption::FontSize, DEFAULT_FONT_SIZE),
            text_message: text(IndicatorOption::TextMessage, DEFAULT_TEXT_MESSAGE),
            eligible_text_message: text(
                IndicatorOption::EligibleTextMessage,
                DEFAULT_ELIGIBLE_TEXT_MESSAGE,
            ),
            message_background: text(
                IndicatorOption::MessageBackground,
                DEFAULT_MESSAGE_BACKGROUND,
            ),
            progress_bar_color: text(
                IndicatorOption::ProgressBarColor,
                DEFAULT_PROGRESS_BAR_COLOR,
            ),
            message_text_color: text(
                IndicatorOption::MessageTextColor,
                DEFAULT_MESSAGE_TEXT_COLOR,
            ),
            custom_css: text(IndicatorOption::CustomCss, DEFAULT_CUSTOM_CSS),
        }
    }

    /// Rebuilds display settings on the widget side, where the payload may omit fields.
    pub fn from_payload(payload: &CheckoutPayload) -> Self {
        fn pick(value: &Option<String>, default: &str) -> String {
            value
                .as_deref()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
                .to_string()
        }

        Self {
            font_size: pick(&payload.font_size, DEFAULT_FONT_SIZE),
            text_message: pick(&payload.msg_text, DEFAULT_TEXT_MESSAGE),
            eligible_text_message: pick(&payload.success_msg, DEFAULT_ELIGIBLE_TEXT_MESSAGE),
            message_background: pick(&payload.bg_color, DEFAULT_MESSAGE_BACKGROUND),
            progress_bar_color: pick(&payload.bar_color, DEFAULT_PROGRESS_BAR_COLOR),
            message_text_color: pick(&payload.text_color, DEFAULT_MESSAGE_TEXT_COLOR),
            custom_css: payload.custom_css.clone().unwrap_or_default(),
        }
    }
}

/// Fully resolved options for one store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IndicatorSettings {
    pub engine: EngineSettings,
    pub display: DisplaySettings,
}

impl IndicatorSettings {
    pub fn resolve(view: &StoreConfigView<'_>) -> Self {
        Self {
            engine: EngineSettings::resolve(view),
            display: DisplaySettings::resolve(view),
        }
    }
}

pub(crate) fn parse_flag(raw: Option<&str>) -> bool {
    match raw {
        Some(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => false,
    }
}

/// Absent, unparseable, non-finite, and negative amounts all collapse to zero.
pub(crate) fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|amount| amount.is_finite() && *amount > 0.0)
        .unwrap_or(0.0)
}
