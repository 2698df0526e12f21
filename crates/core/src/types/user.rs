//! User profile and the per-user snapshot.

use serde::{Deserialize, Serialize};

use crate::types::cart::{CartItem, WishlistItem};
use crate::types::order::Order;

/// Profile of an authenticated user.
///
/// Owned by the session manager; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Backend user id. Absent for offline-derived sessions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Account email.
    pub email: String,
    /// Default shipping address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<String>,
    /// Default billing address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<String>,
}

impl UserProfile {
    /// Key under which this user's snapshot is stored: the backend id when
    /// present, otherwise the email.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.email)
    }
}

/// The serialized `{profile, cart, wishlist, orders}` tuple for one user.
///
/// This is the unit of load/save for the synchronization writer: each write
/// carries the whole snapshot, so rapid successive writes resolve by
/// last-writer-wins without per-field merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UserSnapshot {
    /// Profile copy, if one has been loaded.
    #[serde(default)]
    pub profile: Option<UserProfile>,
    /// Cart lines.
    #[serde(default)]
    pub cart: Vec<CartItem>,
    /// Wishlist entries.
    #[serde(default)]
    pub wishlist: Vec<WishlistItem>,
    /// Order history, most recent first.
    #[serde(default)]
    pub orders: Vec<Order>,
}
