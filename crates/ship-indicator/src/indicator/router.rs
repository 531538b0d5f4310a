use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use super::cart::{CartId, CartSnapshot, CartSource, TotalsSegments};
use super::payload::CheckoutPayload;
use super::service::IndicatorService;
use super::source::{ConfigSource, StoreCode};

/// Body for a server-side evaluation; an omitted cart evaluates as empty.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub cart: Option<CartSnapshot>,
}

/// Body for a widget-side recomputation.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecomputeRequest {
    pub config: CheckoutPayload,
    #[serde(default)]
    pub totals: Option<TotalsSegments>,
}

/// Router builder exposing the indicator endpoints.
pub fn indicator_router<C, K>(service: Arc<IndicatorService<C, K>>) -> Router
where
    C: ConfigSource + 'static,
    K: CartSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/stores/:store/indicator/config",
            get(config_handler::<C, K>),
        )
        .route(
            "/api/v1/stores/:store/indicator/evaluate",
            post(evaluate_handler::<C, K>),
        )
        .route(
            "/api/v1/stores/:store/carts/:cart_id/indicator",
            get(cart_indicator_handler::<C, K>),
        )
        .route(
            "/api/v1/indicator/recompute",
            post(recompute_handler::<C, K>),
        )
        .with_state(service)
}

pub(crate) async fn config_handler<C, K>(
    State(service): State<Arc<IndicatorService<C, K>>>,
    Path(store): Path<String>,
) -> Response
where
    C: ConfigSource + 'static,
    K: CartSource + 'static,
{
    let config = service.checkout_config(&StoreCode(store));
    (StatusCode::OK, axum::Json(config)).into_response()
}

pub(crate) async fn evaluate_handler<C, K>(
    State(service): State<Arc<IndicatorService<C, K>>>,
    Path(store): Path<String>,
    axum::Json(request): axum::Json<EvaluateRequest>,
) -> Response
where
    C: ConfigSource + 'static,
    K: CartSource + 'static,
{
    let evaluation = service.evaluate(&StoreCode(store), request.cart.as_ref());
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn cart_indicator_handler<C, K>(
    State(service): State<Arc<IndicatorService<C, K>>>,
    Path((store, cart_id)): Path<(String, String)>,
) -> Response
where
    C: ConfigSource + 'static,
    K: CartSource + 'static,
{
    let evaluation = service.evaluate_cart(&StoreCode(store), &CartId(cart_id));
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}

pub(crate) async fn recompute_handler<C, K>(
    State(service): State<Arc<IndicatorService<C, K>>>,
    axum::Json(request): axum::Json<RecomputeRequest>,
) -> Response
where
    C: ConfigSource + 'static,
    K: CartSource + 'static,
{
    let evaluation = service.recompute(&request.config, request.totals.as_ref());
    (StatusCode::OK, axum::Json(evaluation)).into_response()
}
