//! HTTP route handlers for the marketplace API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                             - Health check
//!
//! # Auth
//! POST /api/auth/login                     - Login, stores the user in the session
//! POST /api/auth/signup                    - Register and log in
//! POST /api/auth/logout                    - Logout
//! GET  /api/auth/user?userId=              - Public profile of a user
//! GET  /api/auth/me                        - Session user (401 when logged out)
//!
//! # Catalog
//! GET  /api/artworks                       - Filtered artwork listing
//! GET  /api/artworks/{id}                  - Artwork with its artist
//! GET  /api/artists/{id}/artworks          - Artworks by one artist
//! GET  /api/recommendations                - Similar artworks
//! GET  /api/search?query=                  - Search
//! POST /api/search                         - Query suggestions
//!
//! # Cart (session)
//! GET  /api/cart                           - Items and totals
//! POST /api/cart/add                       - Add artwork (no-op if present)
//! POST /api/cart/update                    - Set quantity (<= 0 removes)
//! POST /api/cart/remove                    - Remove artwork
//! POST /api/cart/clear                     - Empty the cart
//! GET  /api/cart/count                     - Total quantity
//!
//! # Messaging (requires auth)
//! GET  /api/conversations                  - Conversation list with unread counts
//! GET  /api/conversations/{id}/messages    - Messages, oldest first
//! POST /api/conversations/{id}/read        - Mark as read
//! POST /api/messages                       - Send a message
//!
//! # AI
//! POST /api/grok-pricing                   - Price range suggestion
//! POST /api/analyze                        - Artwork critique
//! POST /api/ai/chat                        - Enhancement chat
//! POST /api/matchmaking                    - Artist matchmaking
//!
//! # Uploads
//! POST /api/upload-artwork                 - Multipart artwork upload
//! GET  /api/test-blob                      - Blob storage check
//! ```

pub mod ai;
pub mod artworks;
pub mod auth;
pub mod cart;
pub mod messages;
pub mod search;
pub mod upload;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/signup", post(auth::signup))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::user))
        .route("/me", get(auth::me))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the catalog, search and recommendation routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/artworks", get(artworks::index))
        .route("/artworks/{id}", get(artworks::show))
        .route("/artists/{id}/artworks", get(artworks::by_artist))
        .route("/recommendations", get(artworks::recommendations))
        .route("/search", get(search::search).post(search::suggestions))
}

/// Create the messaging routes router.
pub fn messaging_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", get(messages::conversations))
        .route(
            "/conversations/{id}/messages",
            get(messages::conversation_messages),
        )
        .route("/conversations/{id}/read", post(messages::mark_read))
        .route("/messages", post(messages::send))
}

/// Create the AI routes router.
pub fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/grok-pricing", post(ai::grok_pricing))
        .route("/analyze", post(ai::analyze))
        .route("/ai/chat", post(ai::chat))
        .route("/matchmaking", post(ai::matchmaking))
}

/// Create the upload routes router.
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/upload-artwork",
            post(upload::upload_artwork).layer(DefaultBodyLimit::max(upload::MAX_UPLOAD_BYTES)),
        )
        .route("/test-blob", get(upload::test_blob))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/cart", cart_routes())
        .merge(catalog_routes())
        .merge(messaging_routes())
        .merge(ai_routes())
        .merge(upload_routes());

    Router::new().nest("/api", api)
}
