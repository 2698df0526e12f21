//! Behavior with no backend at all: every operation that promises an
//! offline fallback keeps working against an unroutable address.

#![allow(clippy::unwrap_used)]

use aurelia_client::{AppState, ClientConfig};
use aurelia_core::{PaymentInfo, ProductId};
use rust_decimal::Decimal;

/// Nothing listens here; connections are refused immediately.
const DEAD_URL: &str = "http://127.0.0.1:1/api";

fn offline_state(dir: &tempfile::TempDir) -> AppState {
    AppState::new(ClientConfig::new(DEAD_URL, dir.path())).unwrap()
}

#[tokio::test]
async fn browsing_falls_back_to_the_static_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let state = offline_state(&dir);

    let products = state.gateway().fetch_products().await.unwrap();
    assert_eq!(products.len(), 6);
    assert_eq!(products[0].name, "Seraphina Necklace");

    let ring = state
        .gateway()
        .fetch_product_by_id(&ProductId::new("p2"))
        .await
        .unwrap();
    assert_eq!(ring.name, "Orion Ring");
    assert_eq!(ring.price, Decimal::from(780));

    assert!(
        state
            .gateway()
            .fetch_product_by_id(&ProductId::new("p99"))
            .await
            .is_err()
    );
}

#[tokio::test]
async fn offline_login_and_restore() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = offline_state(&dir);
        state.restore_session().await.unwrap();
        state
            .login("alex.doe@example.com", "whatever")
            .await
            .unwrap();
        assert!(state.is_authenticated());

        let user = state.current_user().unwrap();
        assert_eq!(user.email, "alex.doe@example.com");
        assert_eq!(user.name, "alex.doe");
    }

    // The derived token carries enough to restore the session offline too
    let state = offline_state(&dir);
    state.restore_session().await.unwrap();
    assert!(state.is_authenticated());
    assert_eq!(state.current_user().unwrap().email, "alex.doe@example.com");
}

#[tokio::test]
async fn cart_and_wishlist_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let necklace;

    {
        let state = offline_state(&dir);
        state.restore_session().await.unwrap();
        state.login("alex.doe@example.com", "pw").await.unwrap();

        necklace = state.gateway().fetch_products().await.unwrap()[0].clone();
        state.add_to_cart(&necklace, 2).await;
        state.add_to_wishlist(&necklace).await;
    }

    let state = offline_state(&dir);
    state.restore_session().await.unwrap();

    let cart = state.cart();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].product_id, necklace.id);
    assert_eq!(cart[0].quantity, 2);
    assert!(state.is_in_wishlist(&necklace.id));
}

#[tokio::test]
async fn offline_orders_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let placed_id;

    {
        let state = offline_state(&dir);
        state.restore_session().await.unwrap();
        state.login("alex.doe@example.com", "pw").await.unwrap();

        let necklace = state.gateway().fetch_products().await.unwrap()[0].clone();
        state.add_to_cart(&necklace, 1).await;
        let order = state
            .place_order_with_fee(PaymentInfo::new("cod"), 25)
            .await
            .unwrap()
            .unwrap();
        placed_id = order.id;
        assert_eq!(order.total, Decimal::from(490));
    }

    let state = offline_state(&dir);
    state.restore_session().await.unwrap();

    let orders = state.orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, placed_id);
    assert!(orders[0].total_is_consistent());
}

#[tokio::test]
async fn anonymous_cart_is_ephemeral() {
    let dir = tempfile::tempdir().unwrap();

    {
        let state = offline_state(&dir);
        state.restore_session().await.unwrap();
        let necklace = state.gateway().fetch_products().await.unwrap()[0].clone();
        state.add_to_cart(&necklace, 1).await;
        assert_eq!(state.cart().len(), 1);
    }

    // Nothing was persisted for an anonymous visitor
    let state = offline_state(&dir);
    state.restore_session().await.unwrap();
    assert!(state.cart().is_empty());
}

#[tokio::test]
async fn logout_works_offline() {
    let dir = tempfile::tempdir().unwrap();
    let state = offline_state(&dir);
    state.restore_session().await.unwrap();
    state.login("alex.doe@example.com", "pw").await.unwrap();

    state.logout().unwrap();
    assert!(!state.is_authenticated());
    assert!(state.store().auth_token().unwrap().is_none());

    // And the next restart stays anonymous
    let state = offline_state(&dir);
    state.restore_session().await.unwrap();
    assert!(!state.is_authenticated());
}
