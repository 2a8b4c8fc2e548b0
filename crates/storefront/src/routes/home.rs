//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use super::collections::ProductView;
use crate::filters;
use crate::state::AppState;

/// Home page template: hero copy plus the featured product card.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub store_name: String,
    pub featured: Option<ProductView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate {
        store_name: state.config().store_name.clone(),
        featured: state.catalog().featured().map(ProductView::from),
    }
}
