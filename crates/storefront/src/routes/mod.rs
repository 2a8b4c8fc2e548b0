//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Home page (featured product)
//! GET  /health           - Health check
//!
//! # Catalog
//! GET  /collections      - Product grid (?q=search&sort=featured|price-asc|price-desc)
//!
//! # Cart (HTMX fragments)
//! GET  /cart             - Cart page
//! POST /cart/add         - Add one unit (returns count badge, triggers cart-updated)
//! POST /cart/update      - Change quantity by delta (returns cart_items fragment)
//! POST /cart/remove      - Remove line (returns cart_items fragment)
//! POST /cart/clear       - Empty the cart (returns cart_items fragment)
//! GET  /cart/count       - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout         - Order summary and shipping form
//! POST /checkout         - Payment widget options (JSON)
//! GET  /success          - Order confirmation
//!
//! # Legacy
//! GET  /index.html, /collections.html, /cart.html, /checkout.html, /success.html
//!                        - 308 to the routes above
//! ```

pub mod cart;
pub mod checkout;
pub mod collections;
pub mod home;
pub mod pages;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/collections", get(collections::index))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::pay))
        .route("/success", get(pages::success))
        .merge(pages::legacy_routes())
}
