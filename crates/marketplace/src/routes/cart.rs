//! Cart route handlers.
//!
//! The cart lives in the session under [`session_keys::CART`]. Items are
//! snapshots of the artwork taken when added; totals are recomputed from the
//! items on every response.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use artconnect_core::{ArtworkId, Cart, CartItem, CurrencyCode, QuantityChange};

use crate::db::artworks::ArtworkRepository;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    pub currency: CurrencyCode,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
            currency: cart.currency(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub artwork_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartRequest {
    pub artwork_id: Option<String>,
    pub quantity: Option<i64>,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session. A missing or unreadable cart is empty.
async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("Session error: {e}")))
}

fn required_artwork_id(artwork_id: Option<String>) -> Result<ArtworkId> {
    artwork_id
        .filter(|id| !id.trim().is_empty())
        .map(|id| ArtworkId::new(id.trim()))
        .ok_or_else(|| AppError::BadRequest("Artwork ID is required".to_string()))
}

// =============================================================================
// Handlers
// =============================================================================

/// The session cart.
///
/// GET /api/cart
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    Json(CartView::from(&load_cart(&session).await))
}

/// Add an artwork. Adding one that is already in the cart changes nothing.
///
/// POST /api/cart/add
#[instrument(skip(state, session, payload))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<CartItemRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = payload?;
    let artwork_id = required_artwork_id(body.artwork_id)?;

    let artwork = ArtworkRepository::new(state.db())
        .get_by_id(&artwork_id)
        .await
        .ok_or_else(|| AppError::NotFound("Artwork not found".to_string()))?;

    let mut cart = load_cart(&session).await;
    let added = cart.add(CartItem {
        image: artwork.cover_image().map(String::from),
        artwork_id: artwork.id,
        title: artwork.title,
        artist_id: artwork.artist_id,
        price: artwork.price,
        quantity: 1,
    });

    if added {
        save_cart(&session, &cart).await?;
        add_breadcrumb("cart", "Added artwork", Some(&[("artwork_id", artwork_id.as_str())]));
    }

    Ok(Json(CartView::from(&cart)))
}

/// Set an item's quantity; zero or less removes it.
///
/// POST /api/cart/update
#[instrument(skip(session, payload))]
pub async fn update(
    session: Session,
    payload: std::result::Result<Json<UpdateCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = payload?;
    let artwork_id = required_artwork_id(body.artwork_id)?;
    let quantity = body
        .quantity
        .ok_or_else(|| AppError::BadRequest("Quantity is required".to_string()))?;

    let mut cart = load_cart(&session).await;
    match cart.set_quantity(&artwork_id, quantity) {
        QuantityChange::NotInCart => {
            return Err(AppError::NotFound("Item not in cart".to_string()));
        }
        QuantityChange::Removed | QuantityChange::Updated(_) => {
            save_cart(&session, &cart).await?;
        }
    }

    Ok(Json(CartView::from(&cart)))
}

/// Remove an item. Removing something not in the cart is not an error.
///
/// POST /api/cart/remove
#[instrument(skip(session, payload))]
pub async fn remove(
    session: Session,
    payload: std::result::Result<Json<CartItemRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = payload?;
    let artwork_id = required_artwork_id(body.artwork_id)?;

    let mut cart = load_cart(&session).await;
    if cart.remove(&artwork_id) {
        save_cart(&session, &cart).await?;
    }

    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
///
/// POST /api/cart/clear
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Total quantity in the cart, for the header badge.
///
/// GET /api/cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<Value> {
    let cart = load_cart(&session).await;
    Json(json!({ "count": cart.total_items() }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use artconnect_core::ArtistId;

    use super::*;

    #[test]
    fn test_cart_view_totals() {
        let mut cart = Cart::default();
        cart.add(CartItem {
            artwork_id: ArtworkId::new("1"),
            title: "Misty Mountains".to_string(),
            artist_id: ArtistId::new("1"),
            image: None,
            price: Some(Decimal::from(12_000)),
            quantity: 1,
        });
        cart.set_quantity(&ArtworkId::new("1"), 2);

        let json = serde_json::to_value(CartView::from(&cart)).unwrap();
        assert_eq!(json["totalItems"], 2);
        assert_eq!(json["totalPrice"], 24_000.0);
        assert_eq!(json["currency"], "HKD");
        assert_eq!(json["items"][0]["artworkId"], "1");
    }

    #[test]
    fn test_required_artwork_id() {
        assert!(required_artwork_id(None).is_err());
        assert!(required_artwork_id(Some("  ".to_string())).is_err());
        assert_eq!(
            required_artwork_id(Some(" 3 ".to_string())).unwrap().as_str(),
            "3"
        );
    }
}
