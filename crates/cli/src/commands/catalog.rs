//! Catalog inspection commands.
//!
//! Uses the same scanner as the storefront, so this shows exactly what
//! customers will see after a restart.

use std::path::PathBuf;

use sura_storefront::catalog::Catalog;
use sura_storefront::config::StorefrontConfig;

/// Print every product folder the scanner picks up.
///
/// `root` overrides the configured catalog directory, handy for checking
/// a new batch of photos before swapping it in.
#[allow(clippy::print_stdout)]
pub fn list(root: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let root = root.unwrap_or(config.catalog_dir);
    let catalog = Catalog::load(&root, config.default_price)?;

    if catalog.is_empty() {
        println!("No products found under {}.", root.display());
        return Ok(());
    }

    println!("{:<16} {:<20} {:>8} {:>8}", "ID", "NAME", "PRICE", "IMAGES");
    for product in catalog.products() {
        println!(
            "{:<16} {:<20} {:>8} {:>8}",
            product.id.to_string(),
            product.name,
            product.price.to_string(),
            product.images.len()
        );
    }
    Ok(())
}
