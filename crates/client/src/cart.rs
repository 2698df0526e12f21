//! Cart and wishlist mutations.
//!
//! All mutations apply to the in-memory state first (the UI re-renders from
//! it immediately) and then hand off to the snapshot writer, which persists
//! locally and mirrors remotely in the background.

use tracing::{debug, instrument};

use aurelia_core::{CartItem, Product, ProductId, WishlistItem};

use crate::state::AppState;

impl AppState {
    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` of `product` to the cart.
    ///
    /// A product already in the cart has its quantity increased instead of
    /// gaining a second line; insertion order is preserved either way.
    /// Quantities of zero are ignored.
    #[instrument(skip(self, product), fields(id = %product.id, quantity))]
    pub async fn add_to_cart(&self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        {
            let mut data = self.data();
            match data.cart.iter_mut().find(|i| i.product_id == product.id) {
                Some(item) => item.quantity += quantity,
                None => data.cart.push(CartItem::from_product(product, quantity)),
            }
        }
        debug!("cart updated");
        self.sync_user_data().await;
    }

    /// Remove a product from the cart. Removing an absent product is a
    /// no-op.
    #[instrument(skip(self), fields(id = %product_id))]
    pub async fn remove_from_cart(&self, product_id: &ProductId) {
        self.data().cart.retain(|i| &i.product_id != product_id);
        self.sync_user_data().await;
    }

    /// Set the quantity of a cart line. A quantity of zero removes the
    /// line; updating an absent product is a no-op.
    #[instrument(skip(self), fields(id = %product_id, quantity))]
    pub async fn update_cart_quantity(&self, product_id: &ProductId, quantity: u32) {
        {
            let mut data = self.data();
            if quantity == 0 {
                data.cart.retain(|i| &i.product_id != product_id);
            } else if let Some(item) = data.cart.iter_mut().find(|i| &i.product_id == product_id) {
                item.quantity = quantity;
            }
        }
        self.sync_user_data().await;
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub async fn clear_cart(&self) {
        self.data().cart.clear();
        self.sync_user_data().await;
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Add a product to the wishlist. The wishlist is a set: adding a
    /// product already on it is a no-op.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn add_to_wishlist(&self, product: &Product) {
        {
            let mut data = self.data();
            if data.wishlist.iter().any(|i| i.product_id == product.id) {
                return;
            }
            data.wishlist.push(WishlistItem::from_product(product));
        }
        self.sync_user_data().await;
    }

    /// Remove a product from the wishlist. Removing an absent product is a
    /// no-op.
    #[instrument(skip(self), fields(id = %product_id))]
    pub async fn remove_from_wishlist(&self, product_id: &ProductId) {
        self.data()
            .wishlist
            .retain(|i| &i.product_id != product_id);
        self.sync_user_data().await;
    }

    /// Whether a product is on the wishlist.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.data().wishlist.iter().any(|i| &i.product_id == product_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::config::ClientConfig;
    use crate::gateway::catalog;

    fn test_state() -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let state =
            AppState::new(ClientConfig::new("http://127.0.0.1:1/api", dir.path())).unwrap();
        (dir, state)
    }

    fn product(id: &str) -> Product {
        catalog::find(&ProductId::new(id)).unwrap()
    }

    #[tokio::test]
    async fn test_add_to_cart_merges_by_product() {
        let (_dir, state) = test_state();
        state.add_to_cart(&product("p1"), 1).await;
        state.add_to_cart(&product("p2"), 1).await;
        state.add_to_cart(&product("p1"), 2).await;

        let cart = state.cart();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].product_id, ProductId::new("p1"));
        assert_eq!(cart[0].quantity, 3);
        assert_eq!(cart[1].quantity, 1);
    }

    #[tokio::test]
    async fn test_add_zero_quantity_is_ignored() {
        let (_dir, state) = test_state();
        state.add_to_cart(&product("p1"), 0).await;
        assert!(state.cart().is_empty());
    }

    #[tokio::test]
    async fn test_update_quantity_to_zero_removes_line() {
        let (_dir, state) = test_state();
        state.add_to_cart(&product("p1"), 2).await;
        state.add_to_cart(&product("p3"), 1).await;

        state.update_cart_quantity(&ProductId::new("p1"), 0).await;

        let cart = state.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].product_id, ProductId::new("p3"));
    }

    #[tokio::test]
    async fn test_update_quantity_of_absent_product_is_noop() {
        let (_dir, state) = test_state();
        state.add_to_cart(&product("p1"), 2).await;
        state.update_cart_quantity(&ProductId::new("p99"), 5).await;

        let cart = state.cart();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_remove_from_cart() {
        let (_dir, state) = test_state();
        state.add_to_cart(&product("p1"), 1).await;
        state.remove_from_cart(&ProductId::new("p1")).await;
        state.remove_from_cart(&ProductId::new("p1")).await;
        assert!(state.cart().is_empty());
    }

    #[tokio::test]
    async fn test_cart_line_totals() {
        let (_dir, state) = test_state();
        state.add_to_cart(&product("p3"), 2).await;

        let cart = state.cart();
        // Luna Earrings at 320 apiece
        assert_eq!(cart[0].line_total(), Decimal::from(640));
    }

    #[tokio::test]
    async fn test_wishlist_is_a_set() {
        let (_dir, state) = test_state();
        state.add_to_wishlist(&product("p2")).await;
        state.add_to_wishlist(&product("p2")).await;

        assert_eq!(state.wishlist().len(), 1);
        assert!(state.is_in_wishlist(&ProductId::new("p2")));

        state.remove_from_wishlist(&ProductId::new("p2")).await;
        assert!(!state.is_in_wishlist(&ProductId::new("p2")));
        assert!(state.wishlist().is_empty());
    }
}
