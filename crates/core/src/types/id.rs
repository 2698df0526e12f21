//! Newtype IDs for type-safe entity references.
//!
//! The backend hands out opaque string identifiers (Mongo object ids for
//! orders, catalog slugs like `p1` for products). The `define_string_id!`
//! macro wraps them so product and order ids cannot be mixed up.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Display`
/// - `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use aurelia_core::define_string_id;
/// define_string_id!(ProductId);
/// define_string_id!(OrderId);
///
/// let product = ProductId::new("p1");
/// assert_eq!(product.as_str(), "p1");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = OrderId::new("o1");
/// ```
#[macro_export]
macro_rules! define_string_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything string-like.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(ProductId);
define_string_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("p1");
        assert_eq!(format!("{id}"), "p1");
    }

    #[test]
    fn test_serde_transparent() {
        let id = OrderId::new("o1700000000000");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"o1700000000000\"");

        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_from_str_and_string() {
        let a: ProductId = "p2".into();
        let b: ProductId = String::from("p2").into();
        assert_eq!(a, b);
    }
}
