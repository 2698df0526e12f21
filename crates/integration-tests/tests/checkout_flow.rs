//! Order placement and history against the mock backend.

#![allow(clippy::unwrap_used)]

use aurelia_client::{ApiError, AppState, ClientConfig, OrderError, PaymentResult};
use aurelia_core::PaymentInfo;
use aurelia_integration_tests::TestBackend;
use rust_decimal::Decimal;

async fn signed_in_state(backend: &TestBackend, dir: &tempfile::TempDir) -> AppState {
    let state = AppState::new(ClientConfig::new(&backend.url, dir.path())).unwrap();
    state.restore_session().await.unwrap();
    state
        .register("Alex", "alex.doe@example.com", "hunter2")
        .await
        .unwrap();
    state
}

#[tokio::test]
async fn online_order_takes_the_server_id() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = signed_in_state(&backend, &dir).await;

    let products = state.gateway().fetch_products().await.unwrap();
    assert_eq!(products[0].name, "Seraphina Necklace (Server Edition)");
    state.add_to_cart(&products[0], 1).await;

    let order = state
        .place_order(PaymentInfo::new("visa"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(order.id.as_str(), "srv-1");
    assert_eq!(order.subtotal, Decimal::from(450));
    assert_eq!(order.shipping, Decimal::from(15));
    assert_eq!(order.total, Decimal::from(465));
    assert!(order.total_is_consistent());
    assert_eq!(order.customer_email.as_deref(), Some("alex.doe@example.com"));

    assert!(state.cart().is_empty());
    assert_eq!(state.orders().len(), 1);
    assert_eq!(backend.order_count(), 1);
    // Nothing was diverted to the offline log
    assert!(state.store().local_orders().unwrap().is_empty());
}

#[tokio::test]
async fn cod_order_carries_the_delivery_fee_to_the_server() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = signed_in_state(&backend, &dir).await;

    let products = state.gateway().fetch_products().await.unwrap();
    state.add_to_cart(&products[1], 2).await;

    let order = state
        .place_order_with_fee(PaymentInfo::new("cod"), 26)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(order.subtotal, Decimal::from(1040));
    assert_eq!(order.delivery_fee, Decimal::from(26));
    assert_eq!(order.total, Decimal::from(1081));
    assert!(order.total_is_consistent());
}

#[tokio::test]
async fn rejected_order_leaves_the_cart_untouched() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = signed_in_state(&backend, &dir).await;

    let products = state.gateway().fetch_products().await.unwrap();
    state.add_to_cart(&products[0], 1).await;

    backend.reject_orders("Payment could not be verified");
    let err = state
        .place_order(PaymentInfo::new("visa"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::Api(ApiError::Rejected { status: 400, .. })
    ));

    // A server "no" is authoritative: nothing is committed anywhere
    assert_eq!(state.cart().len(), 1);
    assert!(state.orders().is_empty());
    assert!(state.last_placed_order().is_none());
    assert!(state.store().local_orders().unwrap().is_empty());
    assert_eq!(backend.order_count(), 0);
}

#[tokio::test]
async fn order_history_is_fetched_on_restore() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();

    {
        let state = signed_in_state(&backend, &dir).await;
        let products = state.gateway().fetch_products().await.unwrap();
        state.add_to_cart(&products[0], 1).await;
        state.place_order(PaymentInfo::new("visa")).await.unwrap();
    }

    let state = AppState::new(ClientConfig::new(&backend.url, dir.path())).unwrap();
    state.restore_session().await.unwrap();

    let orders = state.orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id.as_str(), "srv-1");
    assert!(orders[0].total_is_consistent());
}

#[tokio::test]
async fn single_order_lookup_and_payment_update() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = signed_in_state(&backend, &dir).await;

    let products = state.gateway().fetch_products().await.unwrap();
    state.add_to_cart(&products[0], 1).await;
    let placed = state
        .place_order(PaymentInfo::new("gcash"))
        .await
        .unwrap()
        .unwrap();

    let fetched = state.gateway().fetch_order_by_id(&placed.id).await.unwrap();
    assert_eq!(fetched.id, placed.id);
    assert_eq!(fetched.total, placed.total);

    let result = PaymentResult {
        id: "txn-1".to_owned(),
        status: "COMPLETED".to_owned(),
        ..PaymentResult::default()
    };
    let paid = state
        .gateway()
        .update_order_payment(&placed.id, &result)
        .await
        .unwrap();
    assert_eq!(paid.id, placed.id);
}

#[tokio::test]
async fn snapshot_is_mirrored_after_checkout() {
    let backend = TestBackend::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let state = signed_in_state(&backend, &dir).await;

    let products = state.gateway().fetch_products().await.unwrap();
    state.add_to_cart(&products[0], 1).await;
    state.place_order(PaymentInfo::new("visa")).await.unwrap();

    let mirrored = backend.snapshot_for("alex.doe@example.com").unwrap();
    assert_eq!(mirrored["orders"].as_array().unwrap().len(), 1);
    assert!(mirrored["cart"].as_array().unwrap().is_empty());
}
