use super::super::cart::CartSnapshot;
use super::super::settings::EngineSettings;
use super::ThresholdSource;

pub(crate) fn select_threshold(settings: &EngineSettings) -> (f64, ThresholdSource) {
    if !settings.enabled {
        return (0.0, ThresholdSource::Disabled);
    }

    if settings.use_core_shipping_threshold {
        (
            non_negative(settings.core_free_shipping_subtotal),
            ThresholdSource::CoreCarrier,
        )
    } else {
        (non_negative(settings.custom_min_total), ThresholdSource::Custom)
    }
}

/// A missing or empty cart counts the same as a zero total.
pub(crate) fn select_total(settings: &EngineSettings, snapshot: Option<&CartSnapshot>) -> f64 {
    let snapshot = match snapshot {
        Some(snapshot) if settings.enabled && snapshot.has_items() => snapshot,
        _ => return 0.0,
    };

    let total = if !settings.use_subtotal {
        snapshot.grand_total
    } else if settings.subtotal_includes_discount {
        snapshot.subtotal_with_discount
    } else {
        snapshot.subtotal
    };

    non_negative(total)
}

pub(crate) fn shortfall(threshold: f64, current_total: f64) -> f64 {
    non_negative(threshold - current_total)
}

/// Threshold zero yields zero progress rather than dividing by it.
pub(crate) fn progress_pct(current_total: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }

    ((current_total / threshold) * 100.0).clamp(0.0, 100.0)
}

// f64::max discards NaN in favor of the other operand.
fn non_negative(value: f64) -> f64 {
    value.max(0.0)
}
