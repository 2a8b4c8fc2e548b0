//! The product catalog.
//!
//! The catalog is a fixed list defined at build time, loaded once per process
//! and never mutated. Its order is the "featured" display order.

use serde::{Deserialize, Serialize};

use crate::types::ProductId;

/// A purchasable product.
///
/// Prices are whole rupees. Only `price` takes part in cart arithmetic; the
/// other fields are carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: u64,
    pub compare_at: u64,
    /// Image path relative to the static asset root.
    pub image: String,
    pub tag: String,
    /// Scripture or message printed on the garment.
    pub verse: String,
}

impl ProductRecord {
    /// Whether the product name or verse contains `needle`.
    ///
    /// `needle` must already be lowercased.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.verse.to_lowercase().contains(needle)
    }
}

/// Read-only product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<ProductRecord>,
}

impl Catalog {
    /// Build a catalog from records in display order.
    #[must_use]
    pub const fn new(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&ProductRecord> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in featured order.
    #[must_use]
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }

    /// The product shown on the home page.
    #[must_use]
    pub fn featured(&self) -> Option<&ProductRecord> {
        self.products.first()
    }

    /// Filter and sort products for the collection grid.
    ///
    /// The query matches name or verse case-insensitively; an empty or
    /// blank query matches everything. Price sorts are stable, so products
    /// with equal prices keep their featured order.
    #[must_use]
    pub fn browse(&self, query: &CollectionQuery) -> Vec<&ProductRecord> {
        let needle = query.search.trim().to_lowercase();
        let mut found: Vec<&ProductRecord> = self
            .products
            .iter()
            .filter(|p| needle.is_empty() || p.matches(&needle))
            .collect();

        match query.sort {
            SortOrder::Featured => {}
            SortOrder::PriceAsc => found.sort_by_key(|p| p.price),
            SortOrder::PriceDesc => found.sort_by_key(|p| std::cmp::Reverse(p.price)),
        }
        found
    }
}

impl Default for Catalog {
    /// The FaithWear hoodie line.
    fn default() -> Self {
        Self::new(faithwear_products())
    }
}

/// Sort options for the collection grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
}

impl SortOrder {
    /// All options in the order the sort picker lists them.
    pub const ALL: [Self; 3] = [Self::Featured, Self::PriceAsc, Self::PriceDesc];

    /// Parse a query-string value, falling back to [`SortOrder::Featured`]
    /// for missing or unrecognised values.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("price-asc") => Self::PriceAsc,
            Some("price-desc") => Self::PriceDesc,
            _ => Self::Featured,
        }
    }

    /// Query-string value.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
        }
    }

    /// Label for the sort picker.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Featured => "Sort: Featured",
            Self::PriceAsc => "Sort: Price (low → high)",
            Self::PriceDesc => "Sort: Price (high → low)",
        }
    }
}

/// Search and sort settings for [`Catalog::browse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionQuery {
    pub search: String,
    pub sort: SortOrder,
}

impl CollectionQuery {
    #[must_use]
    pub fn new(search: impl Into<String>, sort: SortOrder) -> Self {
        Self {
            search: search.into(),
            sort,
        }
    }
}

fn product(
    id: &str,
    name: &str,
    price: u64,
    compare_at: u64,
    image: &str,
    tag: &str,
    verse: &str,
) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        name: name.to_owned(),
        price,
        compare_at,
        image: format!("images/{image}"),
        tag: tag.to_owned(),
        verse: verse.to_owned(),
    }
}

fn faithwear_products() -> Vec<ProductRecord> {
    vec![
        product(
            "ps91",
            "Faith Over Fear – Psalm 91:2",
            3999,
            5999,
            "hoodie-faithoverfear-ps91-front.jpg",
            "Best seller",
            "Psalm 91:2",
        ),
        product(
            "crossblk",
            "Faith Over Fear Cross Hoodie",
            3499,
            4999,
            "hoodie-faithoverfear-cross-front.jpg",
            "Unisex",
            "Faith Over Fear",
        ),
        product(
            "pinkps56",
            "Faith Over Fear – Psalm 56:3 (Pink)",
            3799,
            5499,
            "hoodie-faithoverfear-ps56-pink-front.jpg",
            "Limited",
            "Psalm 56:3",
        ),
        product(
            "ps53",
            "Faith Over Fear – Psalm 5:3",
            3599,
            5299,
            "hoodie-faithoverfear-ps53-front.jpg",
            "Cozy fleece",
            "Psalm 5:3",
        ),
        product(
            "polyblk",
            "Polyester Faith Hoodie",
            2899,
            3999,
            "hoodie-faithoverfear-poly-front.jpg",
            "Lightweight",
            "Everyday faith",
        ),
        product(
            "3dcross",
            "3D Cross Faith Hoodie",
            4299,
            6299,
            "hoodie-faithoverfear-3d-cross-front.jpg",
            "Statement piece",
            "Cross graphic",
        ),
        product(
            "flag",
            "Faith Over Fear – American Flag",
            3799,
            5599,
            "hoodie-faithoverfear-flag-front.jpg",
            "Flag + cross",
            "Faith & Freedom",
        ),
        product(
            "holy",
            "God Is Holy Graffiti Hoodie",
            3499,
            4999,
            "hoodie-godisholy-graffiti-front.jpg",
            "Bible study fav",
            "1 Peter 1:14–17",
        ),
        product(
            "funny",
            "Funny Jesus Prayer Hoodie",
            3299,
            4599,
            "hoodie-jesus-prayer-funny-front.jpg",
            "Icebreaker",
            "Prayer",
        ),
        product(
            "bread",
            "BREAD Inspirational Hoodie",
            3099,
            4399,
            "hoodie-bread-toast-front.jpg",
            "Conversation starter",
            "Daily bread",
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(products: &[&ProductRecord]) -> Vec<String> {
        products.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn test_default_catalog_ids_are_unique() {
        let catalog = Catalog::default();
        let unique: HashSet<_> = catalog.products().iter().map(|p| &p.id).collect();
        assert_eq!(unique.len(), catalog.products().len());
        assert_eq!(catalog.products().len(), 10);
    }

    #[test]
    fn test_get_hit_and_miss() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get(&ProductId::new("ps91")).unwrap().price, 3999);
        assert!(catalog.get(&ProductId::new("unknownid")).is_none());
    }

    #[test]
    fn test_featured_is_first() {
        let catalog = Catalog::default();
        assert_eq!(catalog.featured().unwrap().id, "ps91");
        assert!(Catalog::new(Vec::new()).featured().is_none());
    }

    #[test]
    fn test_browse_empty_query_keeps_featured_order() {
        let catalog = Catalog::default();
        let all = catalog.browse(&CollectionQuery::default());
        assert_eq!(all.len(), 10);
        assert_eq!(all.first().unwrap().id, "ps91");
        assert_eq!(all.last().unwrap().id, "bread");
    }

    #[test]
    fn test_browse_matches_name_or_verse_case_insensitively() {
        let catalog = Catalog::default();
        let psalm = catalog.browse(&CollectionQuery::new("PSALM", SortOrder::Featured));
        assert_eq!(ids(&psalm), ["ps91", "pinkps56", "ps53"]);

        let by_verse = catalog.browse(&CollectionQuery::new("daily", SortOrder::Featured));
        assert_eq!(ids(&by_verse), ["bread"]);

        let none = catalog.browse(&CollectionQuery::new("sneakers", SortOrder::Featured));
        assert!(none.is_empty());
    }

    #[test]
    fn test_browse_trims_surrounding_whitespace() {
        let catalog = Catalog::default();
        let blank = catalog.browse(&CollectionQuery::new("   ", SortOrder::Featured));
        assert_eq!(blank.len(), 10);

        let padded = catalog.browse(&CollectionQuery::new("  psalm ", SortOrder::Featured));
        assert_eq!(ids(&padded), ["ps91", "pinkps56", "ps53"]);
    }

    #[test]
    fn test_browse_sort_by_price_is_stable() {
        let catalog = Catalog::default();
        let asc = catalog.browse(&CollectionQuery::new("", SortOrder::PriceAsc));
        assert_eq!(asc.first().unwrap().id, "polyblk");
        assert_eq!(asc.last().unwrap().id, "3dcross");
        // crossblk and holy share a price; featured order breaks the tie
        let pos = |id: &str| asc.iter().position(|p| p.id == id).unwrap();
        assert!(pos("crossblk") < pos("holy"));

        let desc = catalog.browse(&CollectionQuery::new("", SortOrder::PriceDesc));
        assert_eq!(desc.first().unwrap().id, "3dcross");
        assert_eq!(desc.last().unwrap().id, "polyblk");
        let pos = |id: &str| desc.iter().position(|p| p.id == id).unwrap();
        assert!(pos("pinkps56") < pos("flag"));
    }

    #[test]
    fn test_sort_order_from_param() {
        assert_eq!(SortOrder::from_param(None), SortOrder::Featured);
        assert_eq!(SortOrder::from_param(Some("price-asc")), SortOrder::PriceAsc);
        assert_eq!(SortOrder::from_param(Some("price-desc")), SortOrder::PriceDesc);
        assert_eq!(SortOrder::from_param(Some("cheapest")), SortOrder::Featured);
        for sort in SortOrder::ALL {
            assert_eq!(SortOrder::from_param(Some(sort.as_param())), sort);
        }
    }
}
