//! Collection route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use faithwear_core::{CollectionQuery, ProductRecord, Size, SortOrder, format_price};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub compare_at_price: String,
    pub image: String,
    pub tag: String,
    pub verse: String,
}

impl From<&ProductRecord> for ProductView {
    fn from(product: &ProductRecord) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_price(product.price),
            compare_at_price: format_price(product.compare_at),
            image: format!("/static/{}", product.image),
            tag: product.tag.clone(),
            verse: product.verse.clone(),
        }
    }
}

/// Sort picker entry.
#[derive(Clone)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Size picker entry.
#[derive(Clone)]
pub struct SizeOptionView {
    pub value: &'static str,
    pub selected: bool,
}

impl SizeOptionView {
    /// The known sizes with the default one preselected.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Size::KNOWN
            .iter()
            .map(|&value| Self {
                value,
                selected: value == Size::DEFAULT,
            })
            .collect()
    }
}

/// Search and sort query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CollectionParams {
    pub q: Option<String>,
    pub sort: Option<String>,
}

impl CollectionParams {
    fn to_query(&self) -> CollectionQuery {
        CollectionQuery::new(
            self.q.clone().unwrap_or_default(),
            SortOrder::from_param(self.sort.as_deref()),
        )
    }
}

/// Collection grid template.
#[derive(Template, WebTemplate)]
#[template(path = "collections/index.html")]
pub struct CollectionsTemplate {
    pub store_name: String,
    pub products: Vec<ProductView>,
    pub search: String,
    pub sort_options: Vec<SortOptionView>,
    pub sizes: Vec<SizeOptionView>,
}

/// Display the product grid with optional search and sort.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<CollectionParams>,
) -> impl IntoResponse {
    let query = params.to_query();
    let products: Vec<ProductView> = state
        .catalog()
        .browse(&query)
        .into_iter()
        .map(ProductView::from)
        .collect();
    tracing::debug!(results = products.len(), "collection browsed");

    CollectionsTemplate {
        store_name: state.config().store_name.clone(),
        products,
        search: query.search,
        sort_options: SortOrder::ALL
            .iter()
            .map(|sort| SortOptionView {
                value: sort.as_param(),
                label: sort.label(),
                selected: *sort == query.sort,
            })
            .collect(),
        sizes: SizeOptionView::all(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use faithwear_core::Catalog;

    use super::*;

    #[test]
    fn test_product_view_formats_prices() {
        let catalog = Catalog::default();
        let view = ProductView::from(catalog.featured().unwrap());
        assert_eq!(view.price, "₹3,999");
        assert_eq!(view.compare_at_price, "₹5,999");
        assert_eq!(view.image, "/static/images/hoodie-faithoverfear-ps91-front.jpg");
    }

    #[test]
    fn test_params_fall_back_to_featured() {
        let params = CollectionParams {
            q: None,
            sort: Some("bogus".to_string()),
        };
        let query = params.to_query();
        assert_eq!(query.sort, SortOrder::Featured);
        assert!(query.search.is_empty());
    }

    #[test]
    fn test_size_options_preselect_medium() {
        let sizes = SizeOptionView::all();
        let values: Vec<_> = sizes.iter().map(|s| s.value).collect();
        assert_eq!(values, ["S", "M", "L", "XL"]);
        let selected: Vec<_> = sizes.iter().filter(|s| s.selected).map(|s| s.value).collect();
        assert_eq!(selected, ["M"]);
    }
}
