//! Cart and wishlist line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::product::Product;

/// A line in the shopping cart.
///
/// At most one `CartItem` exists per product id; adding an existing product
/// accumulates its quantity instead of duplicating the line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Product this line refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name at the time it was added.
    pub name: String,
    /// Unit price at the time it was added.
    pub price: Decimal,
    /// Product image.
    #[serde(default)]
    pub image_url: String,
    /// Product category.
    #[serde(default)]
    pub category: String,
    /// Quantity, always >= 1 for a live line.
    pub quantity: u32,
}

impl CartItem {
    /// Build a cart line from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A wishlist entry.
///
/// Wishlist entries are unique per product id and carry no quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    /// Product this entry refers to.
    #[serde(rename = "id")]
    pub product_id: ProductId,
    /// Product name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Product image.
    #[serde(default)]
    pub image_url: String,
    /// Product category.
    #[serde(default)]
    pub category: String,
}

impl WishlistItem {
    /// Build a wishlist entry from a catalog product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            category: product.category.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: ProductId::new("p3"),
            name: "Luna Earrings".to_owned(),
            price: Decimal::from(320),
            category: "Earrings".to_owned(),
            image_url: "/images/Earrings/earrings.jpg".to_owned(),
            details: None,
            reviews: vec![],
        }
    }

    #[test]
    fn test_line_total() {
        let item = CartItem::from_product(&sample_product(), 3);
        assert_eq!(item.line_total(), Decimal::from(960));
    }

    #[test]
    fn test_cart_item_serializes_product_id_as_id() {
        let item = CartItem::from_product(&sample_product(), 1);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "p3");
        assert_eq!(json["quantity"], 1);
    }

    #[test]
    fn test_wishlist_item_from_product() {
        let entry = WishlistItem::from_product(&sample_product());
        assert_eq!(entry.product_id, ProductId::new("p3"));
        assert_eq!(entry.price, Decimal::from(320));
    }
}
