//! Orders and payment info.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::cart::CartItem;
use crate::types::id::OrderId;

/// Payment selection attached to an order.
///
/// The method is a label only - no payment processor is involved. Cash on
/// delivery (`cod`) is special-cased because it carries a delivery fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PaymentInfo {
    /// Payment method label (`visa`, `gcash`, `cod`, ...).
    pub method: String,
}

impl PaymentInfo {
    /// Create payment info for the given method label.
    #[must_use]
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
        }
    }

    /// Whether this is a cash-on-delivery payment (case-insensitive).
    #[must_use]
    pub fn is_cod(&self) -> bool {
        self.method.eq_ignore_ascii_case("cod")
    }
}

/// A placed order.
///
/// Orders are immutable snapshots: `items` is decoupled from the live cart,
/// and `total` is always `subtotal + shipping + delivery_fee`. Values coming
/// from the backend are re-checked against that sum rather than trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Opaque order identifier.
    pub id: OrderId,
    /// Creation timestamp.
    pub date: DateTime<Utc>,
    /// Snapshot of the cart at placement time.
    pub items: Vec<CartItem>,
    /// Sum of line totals.
    pub subtotal: Decimal,
    /// Flat shipping fee (zero only for an empty subtotal).
    pub shipping: Decimal,
    /// COD delivery fee; zero for all other payment methods.
    pub delivery_fee: Decimal,
    /// Payment selection.
    pub payment: PaymentInfo,
    /// Grand total.
    pub total: Decimal,
    /// Email of the ordering customer, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl Order {
    /// Whether `total` equals the sum of its three components.
    #[must_use]
    pub fn total_is_consistent(&self) -> bool {
        self.total == self.subtotal + self.shipping + self.delivery_fee
    }
}
