//! Filesystem-backed product catalog.
//!
//! Each immediate subdirectory of the catalog root is one product: the
//! folder name is the product id, its image files are the gallery. There
//! is no product database to administer; the owner drops a folder of
//! photos in and restarts the storefront.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use sura_core::{Price, ProductId};
use thiserror::Error;

/// Image extensions recognized inside a product folder (case-insensitive).
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "avif", "webp"];

/// Directories under the catalog root that are never products.
const SKIP_DIRS: &[&str] = &["static", "data", "target", "node_modules", "__pycache__"];

/// Per-product price overrides in cents, keyed by folder name. Products
/// not listed here sell at the configured default price.
const PRICE_OVERRIDES: &[(&str, i64)] = &[];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog directory {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// A sellable product assembled from one catalog folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Folder name, e.g. `abyss`.
    pub id: ProductId,
    /// Folder name with the first letter capitalized.
    pub name: String,
    pub price: Price,
    pub description: String,
    /// Image paths relative to the catalog root, sorted by file name.
    pub images: Vec<String>,
}

impl Product {
    /// The primary (first) gallery image, if the folder has any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Immutable in-memory catalog, loaded once at startup and shared via `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
    by_id: Arc<HashMap<ProductId, usize>>,
}

impl Catalog {
    /// Scan `root` for product folders.
    ///
    /// Folders with no recognizable images are skipped, as are hidden
    /// folders and the infrastructure names in [`SKIP_DIRS`]. A missing
    /// root yields an empty catalog so a fresh checkout still boots.
    pub fn load(root: &Path, default_price: Price) -> Result<Self, CatalogError> {
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %root.display(), "catalog directory missing; starting empty");
                return Ok(Self::from_products(Vec::new()));
            }
            Err(source) => {
                return Err(CatalogError::Io {
                    path: root.display().to_string(),
                    source,
                });
            }
        };

        let mut products = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(folder) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if folder.starts_with('.') || SKIP_DIRS.contains(&folder) {
                continue;
            }
            let images = collect_images(&path, folder)?;
            if images.is_empty() {
                continue;
            }
            let id = ProductId::new(folder);
            let price = price_override(folder).unwrap_or(default_price);
            products.push(Product {
                name: display_name(folder),
                description: builtin_description(folder)
                    .unwrap_or("A lightweight everyday hijab in a soft, breathable fabric.")
                    .to_owned(),
                id,
                price,
                images,
            });
        }
        products.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::info!(products = products.len(), "catalog loaded");
        Ok(Self::from_products(products))
    }

    fn from_products(products: Vec<Product>) -> Self {
        let by_id = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self {
            products: Arc::new(products),
            by_id: Arc::new(by_id),
        }
    }

    /// All products, sorted by id.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by its folder name.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.by_id.get(id).map(|&i| &self.products[i])
    }

    /// The first `limit` products, for the home page strip.
    #[must_use]
    pub fn featured(&self, limit: usize) -> &[Product] {
        &self.products[..self.products.len().min(limit)]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Gather the image files of one product folder, sorted by file name so the
/// owner controls gallery order by naming (01.jpg, 02.jpg, ...).
fn collect_images(dir: &Path, folder: &str) -> Result<Vec<String>, CatalogError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.display().to_string(),
        source,
    })?;

    let mut images: Vec<String> = entries
        .flatten()
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| {
                    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
                })
        })
        .map(|name| format!("{folder}/{name}"))
        .collect();
    images.sort();
    Ok(images)
}

/// Capitalize the first character of the folder name: `abyss` -> `Abyss`.
fn display_name(folder: &str) -> String {
    let mut chars = folder.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// Hand-written copy for the established collection. New folders fall back
/// to the generic description until copy is written for them.
fn builtin_description(id: &str) -> Option<&'static str> {
    match id {
        "abyss" => Some(
            "A deep, inky tone that anchors any outfit. Soft-matte finish with just enough \
             weight to drape cleanly.",
        ),
        "acorn" => Some(
            "A warm, earthy brown that flatters every skin tone. An easy everyday staple.",
        ),
        "angelic" => Some(
            "An airy off-white with a gentle sheen. Light enough for summer, opaque enough \
             for every day.",
        ),
        "apex" => Some(
            "A cool slate grey with a crisp edge. Pairs with everything from denim to abayas.",
        ),
        "ascent" => Some(
            "A dusty rose that reads neutral from a distance and warm up close.",
        ),
        _ => None,
    }
}

fn price_override(id: &str) -> Option<Price> {
    PRICE_OVERRIDES
        .iter()
        .find(|(folder, _)| *folder == id)
        .map(|&(_, cents)| Price::from_cents(cents))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn write_catalog(dir: &Path, folders: &[(&str, &[&str])]) {
        for (folder, files) in folders {
            let product_dir = dir.join(folder);
            std::fs::create_dir_all(&product_dir).unwrap();
            for file in *files {
                std::fs::write(product_dir.join(file), b"img").unwrap();
            }
        }
    }

    #[test]
    fn test_load_scans_folders() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            &[
                ("abyss", &["02.jpg", "01.jpg"]),
                ("acorn", &["front.webp"]),
            ],
        );

        let catalog = Catalog::load(dir.path(), Price::from_dollars(10)).unwrap();
        assert_eq!(catalog.len(), 2);

        let abyss = catalog.get(&ProductId::new("abyss")).unwrap();
        assert_eq!(abyss.name, "Abyss");
        assert_eq!(abyss.price, Price::from_dollars(10));
        // sorted by file name, not directory order
        assert_eq!(abyss.images, vec!["abyss/01.jpg", "abyss/02.jpg"]);
    }

    #[test]
    fn test_skips_hidden_infra_and_imageless_folders() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(
            dir.path(),
            &[
                ("abyss", &["01.jpg"]),
                (".git", &["01.jpg"]),
                ("static", &["01.jpg"]),
                ("notes", &["readme.txt"]),
            ],
        );

        let catalog = Catalog::load(dir.path(), Price::from_dollars(10)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(&ProductId::new("abyss")).is_some());
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &[("abyss", &["01.JPG", "02.Avif", "03.txt"])]);

        let catalog = Catalog::load(dir.path(), Price::from_dollars(10)).unwrap();
        let abyss = catalog.get(&ProductId::new("abyss")).unwrap();
        assert_eq!(abyss.images.len(), 2);
    }

    #[test]
    fn test_missing_root_is_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let catalog = Catalog::load(&missing, Price::from_dollars(10)).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_featured_clamps_to_catalog_size() {
        let dir = tempfile::tempdir().unwrap();
        write_catalog(dir.path(), &[("abyss", &["01.jpg"]), ("acorn", &["01.jpg"])]);

        let catalog = Catalog::load(dir.path(), Price::from_dollars(10)).unwrap();
        assert_eq!(catalog.featured(4).len(), 2);
        assert_eq!(catalog.featured(1).len(), 1);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("abyss"), "Abyss");
        assert_eq!(display_name("dusty rose"), "Dusty rose");
        assert_eq!(display_name(""), "");
    }
}
