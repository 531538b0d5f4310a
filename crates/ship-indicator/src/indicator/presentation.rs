use serde::{Deserialize, Serialize};

use super::cart::{CartSnapshot, TotalsSegments};
use super::engine::{EligibilityEngine, EligibilityResult};
use super::payload::CheckoutPayload;
use super::settings::DisplaySettings;

/// Store currency format. `pattern` wraps the number at `%s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFormat {
    pub pattern: String,
    pub precision: usize,
    pub decimal_symbol: String,
    pub group_symbol: String,
    pub group_length: usize,
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self {
            pattern: "$%s".to_string(),
            precision: 2,
            decimal_symbol: ".".to_string(),
            group_symbol: ",".to_string(),
            group_length: 3,
        }
    }
}

impl PriceFormat {
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let fixed = format!("{:.*}", self.precision, amount.abs());
        let (integer, fraction) = match fixed.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (fixed.as_str(), None),
        };

        let mut number = self.group_digits(integer);
        if let Some(fraction) = fraction {
            number.push_str(&self.decimal_symbol);
            number.push_str(fraction);
        }

        let negative = amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
        let sign = if negative { "-" } else { "" };
        format!("{sign}{}", self.pattern.replacen("%s", &number, 1))
    }

    fn group_digits(&self, integer: &str) -> String {
        if self.group_length == 0 || integer.len() <= self.group_length {
            return integer.to_string();
        }

        let digits: Vec<char> = integer.chars().collect();
        let lead = digits.len() % self.group_length;
        let mut grouped = String::with_capacity(integer.len() + integer.len() / self.group_length);
        for (index, digit) in digits.iter().enumerate() {
            if index > 0 && index >= lead && (index - lead) % self.group_length == 0 {
                grouped.push_str(&self.group_symbol);
            }
            grouped.push(*digit);
        }
        grouped
    }
}

/// Display-ready indicator state consumed by templates and the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorView {
    pub visible: bool,
    pub eligible: bool,
    /// Eligible message, or the prompt that precedes `remaining_amount`.
    pub message: String,
    pub remaining_amount: String,
    pub bar_width: String,
    pub font_size: String,
    pub text_color: String,
    pub background_color: String,
    pub bar_color: String,
    pub custom_css: String,
}

impl IndicatorView {
    /// Server-side render pass.
    pub fn render(
        display: &DisplaySettings,
        result: &EligibilityResult,
        format: &PriceFormat,
    ) -> Self {
        let message = if result.eligible {
            display.eligible_text_message.clone()
        } else {
            display.text_message.clone()
        };

        Self {
            visible: result.enabled,
            eligible: result.eligible,
            message,
            remaining_amount: format.format(result.remaining),
            bar_width: bar_width(result.completion_rate),
            font_size: display.font_size.clone(),
            text_color: display.message_text_color.clone(),
            background_color: display.message_background.clone(),
            bar_color: display.progress_bar_color.clone(),
            custom_css: display.custom_css.clone(),
        }
    }

    /// Widget-side recomputation: the same engine, rebuilt from the checkout payload.
    pub fn recompute(
        payload: &CheckoutPayload,
        totals: Option<&TotalsSegments>,
        format: &PriceFormat,
    ) -> (EligibilityResult, Self) {
        let engine = EligibilityEngine::from_payload(payload);
        let snapshot = totals.map(CartSnapshot::from_segments);
        let result = engine.evaluate(snapshot.as_ref());
        let view = Self::render(&DisplaySettings::from_payload(payload), &result, format);
        (result, view)
    }
}

/// Percentage string for the progress bar, e.g. `60%`.
pub fn bar_width(completion_rate: f64) -> String {
    let rate = if completion_rate.is_finite() {
        completion_rate.clamp(0.0, 100.0)
    } else {
        0.0
    };
    format!("{rate}%")
}
