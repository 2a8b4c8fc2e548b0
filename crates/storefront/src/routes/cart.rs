//! Cart route handlers.
//!
//! Mutations are HTMX posts. Each one locks the shared cart, applies one
//! engine operation (which persists before returning), and answers with the
//! re-rendered fragment plus an `HX-Trigger: cart-updated` header so the
//! header badge refreshes itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use faithwear_core::{CartState, Catalog, OrderSummary, ProductId, Size, format_price};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_cart_breadcrumb};
use crate::filters;
use crate::state::AppState;

/// HTMX event fired after every cart change.
pub const CART_UPDATED_TRIGGER: (&str, &str) = ("HX-Trigger", "cart-updated");

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub size: String,
    pub name: String,
    pub image: String,
    pub verse: String,
    pub quantity: u32,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    /// Lines whose product is still in the catalog.
    pub items: Vec<CartItemView>,
    /// Whether the cart holds any line at all, including stale ones.
    pub has_items: bool,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Build the view from the current cart.
    #[must_use]
    pub fn new(state: &CartState, catalog: &Catalog) -> Self {
        let summary = OrderSummary::new(state, catalog);
        Self {
            items: summary
                .lines
                .iter()
                .map(|line| CartItemView {
                    product_id: line.product_id.to_string(),
                    size: line.size.to_string(),
                    name: line.name.clone(),
                    image: format!("/static/{}", line.image),
                    verse: line.verse.clone(),
                    quantity: line.quantity,
                    line_price: format_price(line.line_total),
                })
                .collect(),
            has_items: !state.is_empty(),
            subtotal: format_price(summary.subtotal),
            item_count: summary.total_items,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub size: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub size: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
    pub size: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub store_name: String,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

fn product_id(raw: &str) -> Result<ProductId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::BadRequest("product_id is required".to_string()));
    }
    Ok(ProductId::new(raw))
}

/// Blank or missing sizes fall back to the default size.
fn size_or_default(raw: Option<&str>) -> Size {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(Size::default, Size::from)
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await;
    CartShowTemplate {
        store_name: state.config().store_name.clone(),
        cart: CartView::new(cart.state(), state.catalog()),
    }
}

/// Add one unit of a product to the cart (HTMX).
///
/// The product id is not checked against the catalog.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Result<Response> {
    let product_id = product_id(&form.product_id)?;
    let size = size_or_default(form.size.as_deref());
    add_cart_breadcrumb("add", product_id.as_str(), size.as_str());

    let mut cart = state.cart().await;
    cart.add_item(product_id, size);
    let count = cart.total_items();
    tracing::info!(count, "item added to cart");

    Ok((
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Change a line's quantity by `delta` (HTMX).
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let product_id = product_id(&form.product_id)?;
    let size = Size::new(form.size);
    add_cart_breadcrumb("update", product_id.as_str(), size.as_str());

    let mut cart = state.cart().await;
    cart.update_quantity(&product_id, &size, form.delta);

    Ok(items_fragment(CartView::new(cart.state(), state.catalog())))
}

/// Remove a line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let product_id = product_id(&form.product_id)?;
    let size = Size::new(form.size);
    add_cart_breadcrumb("remove", product_id.as_str(), size.as_str());

    let mut cart = state.cart().await;
    cart.remove_item(&product_id, &size);

    Ok(items_fragment(CartView::new(cart.state(), state.catalog())))
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    let mut cart = state.cart().await;
    cart.clear();
    tracing::info!("cart cleared");

    items_fragment(CartView::new(cart.state(), state.catalog()))
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.cart().await.total_items();
    CartCountTemplate { count }
}

fn items_fragment(cart: CartView) -> Response {
    (
        AppendHeaders([CART_UPDATED_TRIGGER]),
        CartItemsTemplate { cart },
    )
        .into_response()
}
