//! Cache value types for the gateway response cache.

use aurelia_core::Product;

/// Values stored in the catalog cache.
///
/// Only read-side catalog responses are cached; auth and order calls always
/// hit the network.
#[derive(Clone)]
pub enum CacheValue {
    /// The full product listing.
    Products(Vec<Product>),
    /// A single product, boxed to keep the enum small.
    Product(Box<Product>),
}
