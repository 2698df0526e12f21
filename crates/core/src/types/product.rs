//! Catalog product types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A catalog product.
///
/// Prices are decimal currency amounts serialized as JSON numbers, matching
/// the backend wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier (e.g. `p1`).
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Category label (e.g. `Rings`).
    pub category: String,
    /// Image path relative to the asset host.
    #[serde(default)]
    pub image_url: String,
    /// Material/gemstone/style details, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ProductDetails>,
    /// Customer reviews.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
}

/// Craftsmanship details attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    /// Base material (e.g. `18k Yellow Gold`).
    pub material: String,
    /// Gemstone description, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemstone: Option<String>,
    /// Style label (e.g. `Minimalist & Classic`).
    pub style: String,
}

/// A customer review on a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Review identifier.
    pub id: String,
    /// Reviewer display name.
    pub author: String,
    /// Star rating, 1-5.
    pub rating: u8,
    /// Review body.
    pub comment: String,
}
