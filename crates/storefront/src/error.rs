//! Unified error handling for route handlers.
//!
//! Route handlers that can fail return `Result<T, AppError>`. Every variant is
//! a client-side problem, so the message goes back to the client as is. Cart
//! actions leave Sentry breadcrumbs for context on errors reported elsewhere.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use faithwear_core::CheckoutError;
use thiserror::Error;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Checkout could not start.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::Checkout(CheckoutError::InvalidEmail(_)) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Checkout(CheckoutError::EmptyCart | CheckoutError::NothingPayable) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "request rejected");
        (self.status(), self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for a cart action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_cart_breadcrumb(message: &str, product_id: &str, size: &str) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some("cart".to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };
    breadcrumb.data.insert(
        "product_id".to_string(),
        serde_json::Value::String(product_id.to_string()),
    );
    breadcrumb.data.insert(
        "size".to_string(),
        serde_json::Value::String(size.to_string()),
    );
    sentry::add_breadcrumb(breadcrumb);
}
