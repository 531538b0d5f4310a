use crate::infra::{load_config_source, InMemoryCartSource};
use clap::Args;
use ship_indicator::config::AppConfig;
use ship_indicator::error::AppError;
use ship_indicator::indicator::{CartSnapshot, InMemoryConfigSource, IndicatorService, StoreCode};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Store configuration export (scope,scope_code,path,value); falls back to INDICATOR_STORE_CONFIG
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Store code to resolve options for; falls back to INDICATOR_DEFAULT_STORE
    #[arg(long)]
    pub(crate) store: Option<String>,
    /// Cart grand total
    #[arg(long, default_value_t = 0.0)]
    pub(crate) grand_total: f64,
    /// Cart subtotal (defaults to the grand total)
    #[arg(long)]
    pub(crate) subtotal: Option<f64>,
    /// Cart subtotal after discounts (defaults to the subtotal)
    #[arg(long)]
    pub(crate) subtotal_with_discount: Option<f64>,
    /// Number of items in the cart; zero evaluates as an empty cart
    #[arg(long, default_value_t = 1)]
    pub(crate) items: u32,
    /// Emit JSON instead of a readable summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct PayloadArgs {
    /// Store configuration export (scope,scope_code,path,value); falls back to INDICATOR_STORE_CONFIG
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Store code to resolve options for; falls back to INDICATOR_DEFAULT_STORE
    #[arg(long)]
    pub(crate) store: Option<String>,
}

impl EvaluateArgs {
    fn snapshot(&self) -> CartSnapshot {
        let subtotal = self.subtotal.unwrap_or(self.grand_total);
        CartSnapshot {
            grand_total: self.grand_total,
            subtotal,
            subtotal_with_discount: self.subtotal_with_discount.unwrap_or(subtotal),
            item_count: self.items,
        }
    }
}

/// Resolve the configuration export and store code, filling gaps from the environment.
fn resolve_target(
    config: Option<PathBuf>,
    store: Option<String>,
) -> Result<(InMemoryConfigSource, StoreCode), AppError> {
    let app_config = AppConfig::load()?;
    let path = config.or(app_config.indicator.store_config_path);
    let source = load_config_source(path.as_deref())?;
    let store = StoreCode::new(store.unwrap_or(app_config.indicator.default_store));
    Ok((source, store))
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let snapshot = args.snapshot();
    let (source, store) = resolve_target(args.config, args.store)?;
    let service = IndicatorService::new(
        Arc::new(source),
        Arc::new(InMemoryCartSource::default()),
    );
    let evaluation = service.evaluate(&store, Some(&snapshot));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    let result = &evaluation.result;
    let view = &evaluation.view;
    println!("Free shipping indicator for store '{}'", store);
    if !result.enabled {
        println!("- Indicator disabled for this store");
        return Ok(());
    }

    let format = service.price_format();
    println!(
        "- Threshold {} | current total {}",
        format.format(result.threshold),
        format.format(result.current_total)
    );
    println!(
        "- Progress {:.1}% (bar width {})",
        result.completion_rate, view.bar_width
    );
    if result.eligible {
        println!("- {}", view.message);
    } else {
        println!("- {}{}", view.message, view.remaining_amount);
    }

    Ok(())
}

pub(crate) fn run_payload(args: PayloadArgs) -> Result<(), AppError> {
    let (source, store) = resolve_target(args.config, args.store)?;
    let service = IndicatorService::new(
        Arc::new(source),
        Arc::new(InMemoryCartSource::default()),
    );
    let config = service.checkout_config(&store);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
