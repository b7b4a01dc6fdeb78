//! Order inspection commands.
//!
//! The owner's daily loop: check new orders, match them against PayPal /
//! CashApp / Zelle activity, then pack and ship.

use sura_storefront::config::StorefrontConfig;
use sura_storefront::store::OrderStore;

/// Print the most recent `limit` orders, newest first.
#[allow(clippy::print_stdout)]
pub async fn list(limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = OrderStore::new(&config.data_dir);

    let orders = store.recent(limit).await?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for order in orders {
        println!(
            "{}  {}  {:<16} {:>8}  {}",
            order.placed_at.format("%Y-%m-%d %H:%M"),
            order.id,
            order.customer.name,
            order.total.to_string(),
            order.status
        );
        for line in &order.lines {
            println!("    {} x {}", line.quantity, line.name);
        }
        if let Some(address) = &order.address {
            println!("    ship to: {address}");
        }
        println!("    phone: {}", order.customer.phone);
    }
    Ok(())
}
