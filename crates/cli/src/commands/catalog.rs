//! Catalog listing.

use std::io::{self, Write};

use faithwear_core::{Catalog, CollectionQuery, SortOrder, format_price};

/// Print the products matching `query`, ordered by `sort`.
///
/// Unknown sort values fall back to featured order, like the storefront.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list(
    catalog: &Catalog,
    query: Option<&str>,
    sort: Option<&str>,
    out: &mut impl Write,
) -> io::Result<()> {
    let query = CollectionQuery::new(query.unwrap_or_default(), SortOrder::from_param(sort));
    let products = catalog.browse(&query);

    if products.is_empty() {
        writeln!(out, "No products match \"{}\".", query.search)?;
        return Ok(());
    }

    for product in products {
        writeln!(
            out,
            "{:<8} {:<28} {:>8}  (was {})  {}",
            product.id.as_str(),
            product.name,
            format_price(product.price),
            format_price(product.compare_at),
            product.verse,
        )?;
    }
    Ok(())
}
