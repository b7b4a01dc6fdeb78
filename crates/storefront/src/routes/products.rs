//! Product listing and detail pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use sura_core::ProductId;
use tower_sessions::Session;

use crate::catalog::Product;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

use super::Nav;

/// A product as the templates see it: prices formatted, image paths
/// turned into URLs under `/images`.
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image_urls: Vec<String>,
}

impl ProductView {
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            description: product.description.clone(),
            image_urls: product
                .images
                .iter()
                .map(|path| format!("/images/{path}"))
                .collect(),
        }
    }

    /// The primary image URL, or a placeholder if the folder was empty.
    pub fn primary_image(&self) -> &str {
        self.image_urls
            .first()
            .map_or("/static/placeholder.svg", String::as_str)
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub nav: Nav,
    pub products: Vec<ProductView>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductTemplate {
    pub nav: Nav,
    pub product: ProductView,
}

/// Display the full catalog.
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    ProductsTemplate {
        nav: Nav::load(&session).await,
        products: state
            .catalog()
            .products()
            .iter()
            .map(ProductView::from_product)
            .collect(),
    }
}

/// Display one product with its gallery.
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product = state
        .catalog()
        .get(&ProductId::new(id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductTemplate {
        nav: Nav::load(&session).await,
        product: ProductView::from_product(product),
    })
}
