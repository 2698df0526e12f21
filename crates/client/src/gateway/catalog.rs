//! Built-in product catalog.
//!
//! Used as the fallback when the backend cannot be reached: browsing keeps
//! working from this static copy of the collection.

use rust_decimal::Decimal;

use aurelia_core::{Product, ProductDetails, ProductId, Review};

/// The full fallback catalog.
#[must_use]
pub fn products() -> Vec<Product> {
    vec![
        product(
            "p1",
            "Seraphina Necklace",
            450,
            "Necklaces",
            "/images/Necklace/necklace.jpg",
            details("18k Yellow Gold", Some("0.5ct Solitaire Diamond"), "Minimalist & Classic"),
            vec![
                review("r1", "Eleanor V.", 5, "Absolutely stunning. The diamond has a brilliant sparkle. I receive compliments every time I wear it."),
                review("r2", "James P.", 5, "Purchased this as a gift for my wife and she was thrilled. The quality is exceptional for the price."),
                review("r3", "Chloe B.", 4, "A beautiful and delicate necklace. It's a little smaller than I expected, but still very lovely."),
            ],
        ),
        product(
            "p2",
            "Orion Ring",
            780,
            "Rings",
            "/images/Rings/ring.jpg",
            details("Platinum", Some("Sapphire with Diamond Accents"), "Vintage Inspired"),
            vec![
                review("r4", "Olivia M.", 5, "This ring is a work of art. The sapphire is a deep, gorgeous blue and the vintage design is timeless."),
                review("r5", "Ben Carter", 5, "Exceeded all my expectations. It looks even more impressive in person. A true heirloom piece."),
            ],
        ),
        product(
            "p3",
            "Luna Earrings",
            320,
            "Earrings",
            "/images/Earrings/earrings.jpg",
            details("14k Rose Gold", Some("Moonstone"), "Bohemian Chic"),
            vec![
                review("r6", "Sophia T.", 5, "I'm in love with these earrings! The moonstone has a beautiful, ethereal glow."),
                review("r7", "Ava G.", 4, "Very pretty and unique. They are a bit heavy for all-day wear, but perfect for special occasions."),
            ],
        ),
        product(
            "p4",
            "Helios Bracelet",
            610,
            "Bracelets",
            "/images/Bracelet/bracelet.jpg",
            details("Sterling Silver with Gold Plating", None, "Modern Geometric"),
            vec![review("r8", "Isabella R.", 5, "Modern, chic, and very well made. It has a nice weight to it and the clasp is secure. A perfect statement piece.")],
        ),
        product(
            "p5",
            "Aether Signet Ring",
            850,
            "Rings",
            "/images/Rings/signet.jpg",
            details("Solid 18k White Gold", Some("Black Onyx"), "Bold & Statement"),
            vec![],
        ),
        product(
            "p6",
            "Caelus Ring",
            390,
            "Rings",
            "/images/Rings/rings.jpg",
            details("Sterling Silver", Some("Lapis Lazuli"), "Celestial & Mystical"),
            vec![
                review("r9", "Mia L.", 5, "The deep blue of the lapis is mesmerizing. It feels very special and unique. I wear it constantly."),
                review("r10", "Lucas H.", 5, "Bought this for my daughter and she adores it. The craftsmanship is excellent."),
            ],
        ),
    ]
}

/// Look up a catalog product by id.
#[must_use]
pub fn find(id: &ProductId) -> Option<Product> {
    products().into_iter().find(|p| &p.id == id)
}

fn product(
    id: &str,
    name: &str,
    price: u32,
    category: &str,
    image_url: &str,
    details: ProductDetails,
    reviews: Vec<Review>,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Decimal::from(price),
        category: category.to_owned(),
        image_url: image_url.to_owned(),
        details: Some(details),
        reviews,
    }
}

fn details(material: &str, gemstone: Option<&str>, style: &str) -> ProductDetails {
    ProductDetails {
        material: material.to_owned(),
        gemstone: gemstone.map(ToOwned::to_owned),
        style: style.to_owned(),
    }
}

fn review(id: &str, author: &str, rating: u8, comment: &str) -> Review {
    Review {
        id: id.to_owned(),
        author: author.to_owned(),
        rating,
        comment: comment.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let products = products();
        assert_eq!(products.len(), 6);

        let mut ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_find_known_product() {
        let necklace = find(&ProductId::new("p1")).unwrap();
        assert_eq!(necklace.name, "Seraphina Necklace");
        assert_eq!(necklace.price, Decimal::from(450));
    }

    #[test]
    fn test_find_unknown_product() {
        assert!(find(&ProductId::new("p99")).is_none());
    }
}
