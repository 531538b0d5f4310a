//! End-to-end behavior of the free-shipping indicator through its public facade.
//!
//! Scenarios load store configuration the way an operator exports it, then drive the service
//! and HTTP router so server rendering and widget recomputation are checked together.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use ship_indicator::indicator::{
        CartId, CartSnapshot, CartSource, CartSourceError, InMemoryConfigSource,
        IndicatorService,
    };

    pub(super) const STORE_CONFIG: &str = "scope,scope_code,path,value\n\
        default,,ship_indicator/general/is_enable,1\n\
        default,,ship_indicator/general/order_min_total,100\n\
        default,,carriers/freeshipping/free_shipping_subtotal,150\n\
        default,,ship_indicator/customization/text_message,Spend \n\
        stores,wholesale,ship_indicator/general/use_core_freeshipping_config,1\n\
        stores,wholesale,ship_indicator/general/use_order_subtotal,1\n\
        stores,wholesale,ship_indicator/general/order_subtotal_includes_discount,1\n\
        stores,closed,ship_indicator/general/is_enable,0\n";

    #[derive(Default)]
    pub(super) struct SessionCarts {
        carts: Mutex<HashMap<CartId, CartSnapshot>>,
    }

    impl SessionCarts {
        pub(super) fn put(&self, cart_id: &str, snapshot: CartSnapshot) {
            self.carts
                .lock()
                .expect("cart mutex poisoned")
                .insert(CartId(cart_id.to_string()), snapshot);
        }
    }

    impl CartSource for SessionCarts {
        fn snapshot(&self, cart_id: &CartId) -> Result<Option<CartSnapshot>, CartSourceError> {
            Ok(self
                .carts
                .lock()
                .expect("cart mutex poisoned")
                .get(cart_id)
                .copied())
        }
    }

    pub(super) fn build_service() -> (
        Arc<IndicatorService<InMemoryConfigSource, SessionCarts>>,
        Arc<SessionCarts>,
    ) {
        let source =
            InMemoryConfigSource::from_reader(STORE_CONFIG.as_bytes()).expect("config loads");
        let carts = Arc::new(SessionCarts::default());
        let service = Arc::new(IndicatorService::new(Arc::new(source), carts.clone()));
        (service, carts)
    }

    pub(super) fn snapshot(
        grand_total: f64,
        subtotal: f64,
        discounted: f64,
        items: u32,
    ) -> CartSnapshot {
        CartSnapshot {
            grand_total,
            subtotal,
            subtotal_with_discount: discounted,
            item_count: items,
        }
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use ship_indicator::indicator::{indicator_router, CartId, StoreCode, TotalsSegments};
use tower::ServiceExt;

use common::*;

#[test]
fn default_store_uses_custom_minimum_and_grand_total() {
    let (service, _) = build_service();
    let cart = snapshot(60.0, 55.0, 50.0, 2);

    let evaluation = service.evaluate(&StoreCode::new("default"), Some(&cart));

    assert_eq!(evaluation.result.threshold, 100.0);
    assert_eq!(evaluation.result.current_total, 60.0);
    assert_eq!(evaluation.result.remaining, 40.0);
    assert_eq!(evaluation.result.completion_rate, 60.0);
    assert_eq!(evaluation.view.message, "Spend ");
    assert_eq!(
        format!("{}{}", evaluation.view.message, evaluation.view.remaining_amount),
        "Spend $40.00"
    );
}

#[test]
fn wholesale_store_uses_carrier_threshold_and_discounted_subtotal() {
    let (service, _) = build_service();
    let cart = snapshot(170.0, 160.0, 150.0, 5);

    let evaluation = service.evaluate(&StoreCode::new("wholesale"), Some(&cart));

    assert_eq!(evaluation.result.threshold, 150.0);
    assert_eq!(evaluation.result.current_total, 150.0);
    assert!(evaluation.result.eligible);
    assert_eq!(evaluation.view.bar_width, "100%");
}

#[test]
fn closed_store_is_inert_regardless_of_cart() {
    let (service, carts) = build_service();
    carts.put("quote-1", snapshot(999.0, 999.0, 999.0, 7));

    let evaluation =
        service.evaluate_cart(&StoreCode::new("closed"), &CartId("quote-1".to_string()));

    assert!(!evaluation.result.enabled);
    assert!(!evaluation.result.eligible);
    assert_eq!(evaluation.result.threshold, 0.0);
    assert_eq!(evaluation.result.completion_rate, 0.0);
    assert!(
        !service
            .checkout_config(&StoreCode::new("closed"))
            .ship_indicator
            .enabled
    );
}

#[test]
fn widget_recomputation_tracks_live_totals() {
    let (service, _) = build_service();
    let store = StoreCode::new("wholesale");
    let payload = service.checkout_config(&store).ship_indicator;

    let progression = [(30.0, -0.0, 20.0), (100.0, -10.0, 60.0), (160.0, -10.0, 100.0)];
    for (subtotal, discount, expected_rate) in progression {
        let totals = TotalsSegments {
            grand_total: subtotal + discount + 5.0,
            subtotal,
            discount_amount: Some(discount),
            items_qty: 2,
        };
        let widget = service.recompute(&payload, Some(&totals));
        let server = service.evaluate(
            &store,
            Some(&snapshot(totals.grand_total, subtotal, subtotal + discount, 2)),
        );

        assert_eq!(widget.result.completion_rate, expected_rate);
        assert_eq!(widget, server);
    }
}

#[tokio::test]
async fn router_serves_config_and_cart_indicator() {
    let (service, carts) = build_service();
    carts.put("quote-9", snapshot(75.0, 75.0, 75.0, 1));
    let router = indicator_router(service);

    let config = router
        .clone()
        .oneshot(
            Request::get("/api/v1/stores/wholesale/indicator/config")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(config.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(config.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let payload: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(payload["shipIndicator"]["threshold"], 150.0);
    assert_eq!(payload["shipIndicator"]["useSubtotal"], true);
    assert_eq!(payload["shipIndicator"]["includeDiscount"], true);

    let indicator = router
        .oneshot(
            Request::get("/api/v1/stores/default/carts/quote-9/indicator")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(indicator.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(indicator.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let evaluation: Value = serde_json::from_slice(&bytes).expect("json body");
    assert_eq!(evaluation["result"]["completionRate"], 75.0);
    assert_eq!(evaluation["view"]["remainingAmount"], "$25.00");
}
