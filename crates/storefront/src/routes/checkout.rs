//! Checkout, payment instructions, and confirmation.
//!
//! Settlement is manual: the order is persisted as pending payment, the
//! buyer is shown the shop's PayPal/CashApp/Zelle details, and the shop
//! owner reconciles incoming payments against `orders.json` by hand.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use sura_core::{DeliveryMethod, OrderId, PaymentMethod};
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{CurrentUser, Order, session::keys};
use crate::services::CheckoutService;
use crate::services::checkout::{CheckoutError, OrderDetails};
use crate::state::AppState;

use super::Nav;
use super::bag::{self, CheckoutFormValues};

// =============================================================================
// Templates
// =============================================================================

/// An order as the payment and confirmation templates see it.
pub struct OrderView {
    pub id: String,
    pub placed_at: String,
    pub customer_name: String,
    pub delivery: String,
    pub lines: Vec<OrderLineView>,
    pub subtotal: String,
    pub shipping: String,
    pub total: String,
}

pub struct OrderLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

impl OrderView {
    fn from_order(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            placed_at: order.placed_at.format("%B %e, %Y").to_string(),
            customer_name: order.customer.name.clone(),
            delivery: order.delivery.to_string(),
            lines: order
                .lines
                .iter()
                .map(|l| OrderLineView {
                    name: l.name.clone(),
                    quantity: l.quantity,
                    line_total: l.line_total().to_string(),
                })
                .collect(),
            subtotal: order.subtotal.to_string(),
            shipping: order.shipping.to_string(),
            total: order.total.to_string(),
        }
    }
}

/// Payment instructions page template.
#[derive(Template, WebTemplate)]
#[template(path = "payment.html")]
pub struct PaymentTemplate {
    pub nav: Nav,
    pub order: OrderView,
    /// paypal.me link with the whole-dollar total appended, or `None`
    /// when the configured link isn't a PayPal URL.
    pub paypal_url: Option<String>,
    pub cashapp_link: String,
    pub zelle_info: String,
    pub contact_email: String,
}

/// Thank-you page template.
#[derive(Template, WebTemplate)]
#[template(path = "confirmation.html")]
pub struct ConfirmationTemplate {
    pub nav: Nav,
    pub order_id: Option<String>,
    pub contact_email: String,
    pub instagram: String,
    pub tiktok: String,
}

// =============================================================================
// Routes
// =============================================================================

/// Handle the checkout form on the bag page.
///
/// On validation failure the bag page is re-rendered with the message
/// inline and the form values preserved; the bag is untouched. On success
/// the bag is cleared and the buyer lands on the payment instructions.
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutFormValues>,
) -> Result<Response> {
    let mut cart = bag::load_bag(&session).await;

    let details = OrderDetails {
        name: form.name.clone(),
        phone: form.phone.clone(),
        email: form.email.clone(),
        delivery: form.delivery.parse().unwrap_or(DeliveryMethod::Pickup),
        address: form.address.clone(),
        notes: form.notes.clone(),
        payment_method: parse_payment_method(&form.payment_method),
    };

    let account = session
        .get::<CurrentUser>(keys::CURRENT_USER)
        .await
        .ok()
        .flatten();

    let service = CheckoutService::new(state.orders(), state.users());
    match service
        .place_order(&mut cart, details, account.as_ref().map(|u| &u.email))
        .await
    {
        Ok(order) => {
            bag::save_bag(&session, &cart).await?;
            session
                .insert(keys::LAST_ORDER_ID, &order.id)
                .await
                .map_err(|e| AppError::Internal(format!("failed to save order id: {e}")))?;
            Ok(Redirect::to(&format!("/orders/{}/payment", order.id)).into_response())
        }
        Err(CheckoutError::Repository(e)) => {
            // Keep the bag; the owner would rather get a phone call than
            // lose the sale to a disk error.
            tracing::error!(error = %e, "failed to persist order");
            sentry::capture_error(&e);
            let message = format!(
                "We couldn't save your order just now. Please try again, or email {} and we'll sort it out.",
                state.config().shop.contact_email
            );
            Ok(bag::bag_template(Nav::load(&session).await, &cart, Some(message), form)
                .into_response())
        }
        Err(validation) => {
            Ok(bag::bag_template(
                Nav::load(&session).await,
                &cart,
                Some(validation.to_string()),
                form,
            )
            .into_response())
        }
    }
}

/// Display payment instructions for a just-placed order.
///
/// Only the session that placed the order (or the signed-in account it
/// belongs to) can see this page.
pub async fn payment(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let order_id = OrderId::new(id);
    let order = state.orders().get(&order_id).await?;
    verify_order_access(&session, &order).await?;

    let shop = &state.config().shop;

    Ok(PaymentTemplate {
        nav: Nav::load(&session).await,
        paypal_url: paypal_payment_url(&shop.paypal_link, order.total),
        cashapp_link: shop.cashapp_link.clone(),
        zelle_info: shop.zelle_info.clone(),
        contact_email: shop.contact_email.clone(),
        order: OrderView::from_order(&order),
    })
}

/// The buyer says they have sent payment. Nothing is verified; the order
/// stays pending until the owner confirms the money arrived.
pub async fn paid(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let order_id = OrderId::new(id);
    let order = state.orders().get(&order_id).await?;
    verify_order_access(&session, &order).await?;
    Ok(Redirect::to("/confirmation"))
}

/// Display the thank-you page.
pub async fn confirmation(
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let order_id = session
        .get::<OrderId>(keys::LAST_ORDER_ID)
        .await
        .ok()
        .flatten();

    ConfirmationTemplate {
        nav: Nav::load(&session).await,
        order_id: order_id.map(|id| id.to_string()),
        contact_email: state.config().shop.contact_email.clone(),
        instagram: state.config().shop.instagram.clone(),
        tiktok: state.config().shop.tiktok.clone(),
    }
}

/// Check that this session placed the order, or that the signed-in account
/// owns it. Orders carry contact details, so guessing an id must not
/// expose them; the mismatch reads as a plain 404.
async fn verify_order_access(session: &Session, order: &Order) -> Result<()> {
    let last: Option<OrderId> = session
        .get(keys::LAST_ORDER_ID)
        .await
        .map_err(|e| AppError::Internal(format!("session read failed: {e}")))?;
    if last.as_ref() == Some(&order.id) {
        return Ok(());
    }

    let user: Option<CurrentUser> = session.get(keys::CURRENT_USER).await.ok().flatten();
    if let (Some(user), Some(email)) = (user, order.customer.email.as_ref()) {
        if &user.email == email {
            return Ok(());
        }
    }

    Err(AppError::NotFound(format!("order {}", order.id)))
}

/// Build the one-click PayPal link: the whole-dollar total is appended
/// only to a real paypal.me / paypal.com URL (trailing slash trimmed).
/// Anything else (an empty value, a bare handle) gets no link, and the
/// page falls back to the contact email.
fn paypal_payment_url(link: &str, total: sura_core::Price) -> Option<String> {
    let lower = link.to_lowercase();
    if lower.contains("paypal.me") || lower.contains("paypal.com") {
        Some(format!(
            "{}/{}",
            link.trim_end_matches('/'),
            total.whole_dollars()
        ))
    } else {
        None
    }
}

fn parse_payment_method(raw: &str) -> Option<PaymentMethod> {
    match raw {
        "paypal" => Some(PaymentMethod::PayPal),
        "cashapp" => Some(PaymentMethod::CashApp),
        "zelle" => Some(PaymentMethod::Zelle),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sura_core::Price;

    use super::*;

    #[test]
    fn test_paypal_url_appends_whole_dollar_total() {
        assert_eq!(
            paypal_payment_url("https://www.paypal.me/TheOfficialSura", Price::from_dollars(38)),
            Some("https://www.paypal.me/TheOfficialSura/38".to_owned())
        );
        // cents are truncated, matching what paypal.me accepts in the path
        assert_eq!(
            paypal_payment_url("https://www.paypal.me/TheOfficialSura", Price::from_cents(3850)),
            Some("https://www.paypal.me/TheOfficialSura/38".to_owned())
        );
    }

    #[test]
    fn test_paypal_url_trims_trailing_slash() {
        assert_eq!(
            paypal_payment_url("https://www.paypal.me/TheOfficialSura/", Price::from_dollars(38)),
            Some("https://www.paypal.me/TheOfficialSura/38".to_owned())
        );
    }

    #[test]
    fn test_paypal_url_match_is_case_insensitive() {
        assert_eq!(
            paypal_payment_url("https://www.PayPal.com/pay", Price::from_dollars(10)),
            Some("https://www.PayPal.com/pay/10".to_owned())
        );
    }

    #[test]
    fn test_non_paypal_link_gets_no_url() {
        assert_eq!(paypal_payment_url("@SuraShop", Price::from_dollars(38)), None);
        assert_eq!(paypal_payment_url("", Price::from_dollars(38)), None);
    }

    #[test]
    fn test_confirmation_shows_both_social_handles() {
        let page = ConfirmationTemplate {
            nav: Nav {
                bag_count: 0,
                user: None,
            },
            order_id: Some("SURA-20250101120000-AB12".to_owned()),
            contact_email: "theofficialsura22@gmail.com".to_owned(),
            instagram: "@TheOfficial.Sura".to_owned(),
            tiktok: "@Sura.On.TikTok".to_owned(),
        };

        let html = page.render().unwrap();
        assert!(html.contains("@TheOfficial.Sura"));
        assert!(html.contains("@Sura.On.TikTok"));
        assert!(html.contains("SURA-20250101120000-AB12"));
    }

    #[test]
    fn test_parse_payment_method() {
        assert_eq!(parse_payment_method("paypal"), Some(PaymentMethod::PayPal));
        assert_eq!(parse_payment_method("cashapp"), Some(PaymentMethod::CashApp));
        assert_eq!(parse_payment_method("zelle"), Some(PaymentMethod::Zelle));
        assert_eq!(parse_payment_method(""), None);
        assert_eq!(parse_payment_method("check"), None);
    }
}
