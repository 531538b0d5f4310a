use crate::infra::AppState;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use ship_indicator::indicator::{
    indicator_router, CartId, CartSnapshot, CartSource, ConfigSource, IndicatorService,
};
use std::sync::Arc;
use tracing::debug;

pub(crate) fn with_indicator_routes<C, K>(service: Arc<IndicatorService<C, K>>) -> axum::Router
where
    C: ConfigSource + 'static,
    K: CartSource + 'static,
{
    indicator_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/carts/:cart_id", axum::routing::put(cart_upsert_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn cart_upsert_endpoint(
    Extension(state): Extension<AppState>,
    Path(cart_id): Path<String>,
    Json(snapshot): Json<CartSnapshot>,
) -> impl IntoResponse {
    debug!(%cart_id, items = snapshot.item_count, "cart snapshot updated");
    state.carts.upsert(CartId(cart_id.clone()), snapshot);
    (
        StatusCode::ACCEPTED,
        Json(json!({ "status": "accepted", "cartId": cart_id })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryCartSource;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use ship_indicator::indicator::{InMemoryConfigSource, IndicatorOption};
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let mut source = InMemoryConfigSource::new();
        source.set_default(IndicatorOption::Enabled, "1");
        source.set_default(IndicatorOption::CustomMinTotal, "100");

        let carts = Arc::new(InMemoryCartSource::default());
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            carts: carts.clone(),
        };
        let service = Arc::new(IndicatorService::new(Arc::new(source), carts));

        with_indicator_routes(service).layer(Extension(state))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reflects_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn upserted_cart_feeds_indicator_route() {
        let router = app(true);

        let response = router
            .clone()
            .oneshot(
                Request::put("/api/v1/carts/quote-5")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "grandTotal": 80.0,
                            "subtotal": 80.0,
                            "subtotalWithDiscount": 80.0,
                            "itemCount": 2
                        })
                        .to_string(),
                    ))
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::ACCEPTED);

        let response = router
            .oneshot(
                Request::get("/api/v1/stores/default/carts/quote-5/indicator")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        let body = body_json(response).await;
        assert_eq!(body["result"]["completionRate"], 80.0);
        assert_eq!(body["view"]["remainingAmount"], "$20.00");
    }
}
