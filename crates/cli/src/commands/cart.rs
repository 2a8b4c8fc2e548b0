//! Cart inspection and editing.

use std::io::{self, Write};

use faithwear_core::{CartEngine, CartStorage, Catalog, OrderSummary, ProductId, Size, format_price};

use super::CliError;

fn product_id(raw: &str) -> Result<ProductId, CliError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CliError::InvalidArgument(
            "product id must not be empty".to_string(),
        ));
    }
    Ok(ProductId::new(raw))
}

/// Add one unit of `raw_id` in `size` (default M).
///
/// Ids missing from the catalog are accepted but logged, since the cart
/// keeps them and simply leaves them out of totals.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] for a blank product id.
pub fn add<S: CartStorage>(
    cart: &mut CartEngine<S>,
    catalog: &Catalog,
    raw_id: &str,
    size: Option<&str>,
) -> Result<(), CliError> {
    let id = product_id(raw_id)?;
    if catalog.get(&id).is_none() {
        tracing::warn!(product_id = %id, "product is not in the catalog");
    }
    let size = size
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(Size::default, Size::from);
    cart.add_item(id, size);
    Ok(())
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] for a blank product id.
pub fn update<S: CartStorage>(
    cart: &mut CartEngine<S>,
    raw_id: &str,
    size: &str,
    delta: i64,
) -> Result<(), CliError> {
    let id = product_id(raw_id)?;
    cart.update_quantity(&id, &Size::new(size.trim()), delta);
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns [`CliError::InvalidArgument`] for a blank product id.
pub fn remove<S: CartStorage>(
    cart: &mut CartEngine<S>,
    raw_id: &str,
    size: &str,
) -> Result<(), CliError> {
    let id = product_id(raw_id)?;
    cart.remove_item(&id, &Size::new(size.trim()));
    Ok(())
}

/// Print cart lines followed by item count and subtotal.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show<S: CartStorage>(
    cart: &CartEngine<S>,
    catalog: &Catalog,
    out: &mut impl Write,
) -> io::Result<()> {
    if cart.state().is_empty() {
        return writeln!(out, "Cart is empty.");
    }

    let summary = OrderSummary::new(cart.state(), catalog);
    for line in &summary.lines {
        writeln!(out, "{line}")?;
    }

    let unknown = cart
        .items()
        .iter()
        .filter(|item| catalog.get(&item.product_id).is_none());
    for item in unknown {
        writeln!(
            out,
            "{} × {} ({}) — not in catalog",
            item.quantity, item.product_id, item.size
        )?;
    }

    writeln!(out, "Items: {}", summary.total_items)?;
    writeln!(out, "Subtotal: {}", format_price(summary.subtotal))
}
