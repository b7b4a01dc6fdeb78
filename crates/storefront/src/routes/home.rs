//! Home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tower_sessions::Session;

use crate::filters;
use crate::state::AppState;

use super::Nav;
use super::products::ProductView;

/// Number of products featured on the home page below the hero.
const FEATURED_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub featured: Vec<ProductView>,
}

/// Display the home page with a strip of featured products.
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HomeTemplate {
        nav: Nav::load(&session).await,
        featured: state
            .catalog()
            .featured(FEATURED_COUNT)
            .iter()
            .map(ProductView::from_product)
            .collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sura_core::Price;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_featured_strip_is_three_products() {
        let dir = tempfile::tempdir().unwrap();
        for folder in ["abyss", "acorn", "angelic", "apex"] {
            let product_dir = dir.path().join(folder);
            std::fs::create_dir_all(&product_dir).unwrap();
            std::fs::write(product_dir.join("01.jpg"), b"img").unwrap();
        }

        let catalog = Catalog::load(dir.path(), Price::from_dollars(10)).unwrap();
        assert_eq!(catalog.featured(FEATURED_COUNT).len(), 3);
    }
}
