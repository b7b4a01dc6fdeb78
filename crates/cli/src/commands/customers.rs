//! Customer account inspection commands.

use sura_storefront::config::StorefrontConfig;
use sura_storefront::store::UserStore;

/// Print every account with its order count and newsletter status.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let store = UserStore::new(&config.data_dir);

    let users = store.all().await?;
    if users.is_empty() {
        println!("No customer accounts yet.");
        return Ok(());
    }

    println!(
        "{:<40} {:<20} {:>7} {:>11}",
        "EMAIL", "NAME", "ORDERS", "NEWSLETTER"
    );
    for user in users {
        println!(
            "{:<40} {:<20} {:>7} {:>11}",
            user.email.to_string(),
            user.display_name,
            user.orders.len(),
            if user.newsletter { "yes" } else { "no" }
        );
    }
    Ok(())
}
