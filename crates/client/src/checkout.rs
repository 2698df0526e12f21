//! Order placement.
//!
//! Pricing rules live here: a flat shipping fee on any non-empty order, and
//! a randomized cash-on-delivery surcharge drawn per order. Placement is
//! optimistic: the order is built and recorded locally, and a backend
//! failure downgrades to the offline order log instead of losing the sale.

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, instrument, warn};

use aurelia_core::{CartItem, Order, OrderId, PaymentInfo};

use crate::gateway::ApiError;
use crate::state::AppState;
use crate::store::StoreError;

/// Flat shipping fee applied to every non-empty order.
const SHIPPING_FEE: u32 = 15;

/// Inclusive bounds for the cash-on-delivery surcharge.
const COD_FEE_MIN: u32 = 25;
const COD_FEE_MAX: u32 = 30;

/// Errors raised by order placement.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The backend rejected the order.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The offline order log could not be written. The cart is left
    /// untouched so the order can be retried.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Shipping fee for a given subtotal.
#[must_use]
pub fn shipping_fee(subtotal: Decimal) -> Decimal {
    if subtotal > Decimal::ZERO {
        Decimal::from(SHIPPING_FEE)
    } else {
        Decimal::ZERO
    }
}

/// Draw a cash-on-delivery surcharge from the given source of randomness.
pub fn cod_delivery_fee<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.random_range(COD_FEE_MIN..=COD_FEE_MAX)
}

impl AppState {
    /// Place an order for the current cart contents.
    ///
    /// Returns `Ok(None)` for an empty cart; otherwise the placed order,
    /// with a cash-on-delivery surcharge drawn from thread-local randomness
    /// when the payment method calls for one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the order, or if the backend
    /// is unreachable and the offline order log cannot be written. In both
    /// cases the cart is left untouched.
    #[instrument(skip(self, payment), fields(method = %payment.method))]
    pub async fn place_order(&self, payment: PaymentInfo) -> Result<Option<Order>, OrderError> {
        let fee = cod_delivery_fee(&mut rand::rng());
        self.place_order_with_fee(payment, fee).await
    }

    /// Place an order using `cod_fee` as the cash-on-delivery surcharge.
    ///
    /// The fee is ignored for non-cash payment methods. Callers that need a
    /// reproducible total (or their own randomness source) use this entry
    /// point; [`place_order`](Self::place_order) is the convenience wrapper.
    ///
    /// # Errors
    ///
    /// Same as [`place_order`](Self::place_order).
    pub async fn place_order_with_fee(
        &self,
        payment: PaymentInfo,
        cod_fee: u32,
    ) -> Result<Option<Order>, OrderError> {
        let (items, customer_email) = {
            let data = self.data();
            (data.cart.clone(), data.profile.as_ref().map(|p| p.email.clone()))
        };
        if items.is_empty() {
            return Ok(None);
        }

        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let shipping = shipping_fee(subtotal);
        let delivery_fee = if payment.is_cod() {
            Decimal::from(cod_fee)
        } else {
            Decimal::ZERO
        };
        let draft = Order {
            id: OrderId::new(format!("o{}", Utc::now().timestamp_millis())),
            date: Utc::now(),
            items,
            subtotal,
            shipping,
            delivery_fee,
            payment,
            total: subtotal + shipping + delivery_fee,
            customer_email,
        };

        let order = match self.gateway().create_order(&draft).await {
            Ok(remote) => remote.into_order(Some(&draft)),
            Err(err) if err.is_transport() => {
                warn!(error = %err, "backend unreachable, recording order locally");
                self.store().append_local_order(&draft)?;
                draft
            }
            Err(err) => return Err(err.into()),
        };

        {
            let mut data = self.data();
            data.cart.clear();
            data.orders.insert(0, order.clone());
            data.last_placed_order = Some(order.clone());
        }
        info!(id = %order.id, total = %order.total, "order placed");

        self.sync_user_data().await;
        Ok(Some(order))
    }
}
