use crate::cli::ServeArgs;
use crate::infra::{load_config_source, AppState, InMemoryCartSource};
use crate::routes::with_indicator_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use ship_indicator::config::AppConfig;
use ship_indicator::error::AppError;
use ship_indicator::indicator::IndicatorService;
use ship_indicator::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let carts = Arc::new(InMemoryCartSource::default());
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        carts: carts.clone(),
    };

    let source = load_config_source(config.indicator.store_config_path.as_deref())?;
    let indicator_service = Arc::new(IndicatorService::new(Arc::new(source), carts));

    let app = with_indicator_routes(indicator_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_store = %config.indicator.default_store,
        "free shipping indicator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
