//! Checkout route handlers.
//!
//! The checkout page shows the order summary and a shipping form. Submitting
//! the form posts here; the response is the option object for the hosted
//! Razorpay widget, which `static/js/checkout.js` opens in the browser. No
//! order is recorded server-side.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::State,
    response::IntoResponse,
};
use faithwear_core::{OrderSummary, PaymentRequest, ShippingDetails, format_price, payable_total};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Where the widget sends the shopper after a successful payment.
pub const SUCCESS_PATH: &str = "/success";

/// Shipping form data. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

/// JSON answer to a checkout submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub options: PaymentRequest,
    pub success_url: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub store_name: String,
    pub has_items: bool,
    /// Pre-rendered `qty × name (size) — price` lines.
    pub lines: Vec<String>,
    pub total: String,
}

/// Display the checkout page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = state.cart().await;
    let summary = OrderSummary::new(cart.state(), state.catalog());

    CheckoutTemplate {
        store_name: state.config().store_name.clone(),
        has_items: !cart.state().is_empty(),
        lines: summary.lines.iter().map(ToString::to_string).collect(),
        total: format_price(summary.subtotal),
    }
}

/// Build the payment widget options for the current cart.
///
/// # Errors
///
/// Returns 422 if the cart is empty or has nothing payable, and 400 if the
/// email address is malformed. Cart problems are reported first.
#[instrument(skip(state, form))]
pub async fn pay(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> Result<Json<CheckoutResponse>> {
    let cart = state.cart().await;
    payable_total(cart.state(), state.catalog())?;
    let shipping = ShippingDetails::from_form(&form.name, &form.email, &form.address)?;

    let options = PaymentRequest::for_cart(
        cart.state(),
        state.catalog(),
        state.payment_settings(),
        shipping.as_ref(),
    )?;
    tracing::info!(
        amount = options.amount,
        currency = %options.currency,
        items = cart.total_items(),
        "checkout started"
    );

    Ok(Json(CheckoutResponse {
        options,
        success_url: SUCCESS_PATH.to_string(),
    }))
}
