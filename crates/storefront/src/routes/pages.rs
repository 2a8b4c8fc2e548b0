//! Static page handlers: order confirmation, 404, and redirects from the
//! old `.html` URLs.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::get,
};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/success.html")]
pub struct SuccessTemplate {
    pub store_name: String,
}

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub store_name: String,
}

/// Old static-site paths and where they live now.
pub const LEGACY_PATHS: &[(&str, &str)] = &[
    ("/index.html", "/"),
    ("/collections.html", "/collections"),
    ("/cart.html", "/cart"),
    ("/checkout.html", "/checkout"),
    ("/success.html", "/success"),
];

/// Display the thank-you page the payment widget redirects to.
///
/// The cart is left as is: payment confirmation happens in the widget and
/// is not reported back here.
#[instrument(skip(state))]
pub async fn success(State(state): State<AppState>) -> impl IntoResponse {
    SuccessTemplate {
        store_name: state.config().store_name.clone(),
    }
}

/// Fallback for unknown paths.
pub async fn not_found(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            store_name: state.config().store_name.clone(),
        },
    )
}

/// Permanent redirects for [`LEGACY_PATHS`].
pub fn legacy_routes() -> Router<AppState> {
    LEGACY_PATHS
        .iter()
        .fold(Router::new(), |router, &(from, to)| {
            router.route(from, get(move || async move { Redirect::permanent(to) }))
        })
}
