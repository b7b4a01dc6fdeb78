//! Shopping bag page and line edits.
//!
//! Every edit is a classic form POST followed by a redirect back to the
//! bag page; the bag itself lives in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::Form;
use serde::Deserialize;
use sura_core::ProductId;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Cart, session::keys};
use crate::shipping;
use crate::state::AppState;

use super::Nav;

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the bag out of the session. A missing or unreadable bag is an
/// empty one.
pub async fn load_bag(session: &Session) -> Cart {
    session
        .get::<Cart>(keys::BAG)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the bag back to the session.
pub async fn save_bag(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(keys::BAG, cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to save bag: {e}")))
}

// =============================================================================
// Form Types
// =============================================================================

/// Add-to-bag form data.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: String,
}

/// Quantity adjustment form data.
#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    pub index: usize,
    /// +1 or -1 from the bag page steppers.
    pub delta: i32,
}

/// Line removal form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub index: usize,
}

/// Checkout form values, kept as raw strings so a failed submission can be
/// redisplayed exactly as typed.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutFormValues {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub delivery: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub payment_method: String,
}

// =============================================================================
// Templates
// =============================================================================

/// One bag line as the template sees it.
pub struct LineView {
    pub index: usize,
    pub name: String,
    pub image_url: Option<String>,
    pub unit_price: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Bag page template: line items plus the checkout form.
#[derive(Template, WebTemplate)]
#[template(path = "bag/show.html")]
pub struct BagTemplate {
    pub nav: Nav,
    pub lines: Vec<LineView>,
    pub item_count: u32,
    pub subtotal: String,
    /// Quote if the buyer picks shipping; pickup is always free.
    pub shipping_estimate: String,
    pub estimated_total: String,
    pub ships_free: bool,
    pub error: Option<String>,
    pub form: CheckoutFormValues,
}

/// Build the bag page from the current cart state.
pub(crate) fn bag_template(
    nav: Nav,
    cart: &Cart,
    error: Option<String>,
    form: CheckoutFormValues,
) -> BagTemplate {
    let subtotal = cart.subtotal();
    let item_count = cart.item_count();
    let estimate = shipping::quote(item_count, subtotal);

    BagTemplate {
        nav,
        lines: cart
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| LineView {
                index,
                name: line.name.clone(),
                image_url: line.image.as_ref().map(|p| format!("/images/{p}")),
                unit_price: line.unit_price.to_string(),
                quantity: line.quantity,
                line_total: line.line_total().to_string(),
            })
            .collect(),
        item_count,
        subtotal: subtotal.to_string(),
        shipping_estimate: estimate.to_string(),
        estimated_total: (subtotal + estimate).to_string(),
        ships_free: !cart.is_empty() && estimate.is_zero(),
        error,
        form,
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the bag with the checkout form.
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_bag(&session).await;
    bag_template(
        Nav::load(&session).await,
        &cart,
        None,
        CheckoutFormValues::default(),
    )
}

/// Add one unit of a product to the bag.
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddForm>,
) -> Result<impl IntoResponse> {
    let product = state
        .catalog()
        .get(&ProductId::new(form.product_id.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut cart = load_bag(&session).await;
    cart.add(product);
    save_bag(&session, &cart).await?;

    Ok(Redirect::to("/bag"))
}

/// Adjust a line's quantity.
pub async fn update(session: Session, Form(form): Form<UpdateForm>) -> Result<impl IntoResponse> {
    let mut cart = load_bag(&session).await;
    cart.adjust_quantity(form.index, form.delta);
    save_bag(&session, &cart).await?;

    Ok(Redirect::to("/bag"))
}

/// Remove a line from the bag.
pub async fn remove(session: Session, Form(form): Form<RemoveForm>) -> Result<impl IntoResponse> {
    let mut cart = load_bag(&session).await;
    cart.remove(form.index);
    save_bag(&session, &cart).await?;

    Ok(Redirect::to("/bag"))
}
