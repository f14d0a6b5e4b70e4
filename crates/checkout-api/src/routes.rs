//! # Routes
//!
//! Axum router configuration for the storefront.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Path the selection form posts to
pub const CHECKOUT_SESSION_PATH: &str = "/api/checkout_session";

/// Create the main application router
///
/// Routes:
/// - GET  / - Payment-method selection page
/// - POST /api/checkout_session - Create checkout session, 303 to Stripe
/// - GET  /success - Confirmation page (`?session_id=...`)
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            CHECKOUT_SESSION_PATH,
            post(handlers::create_checkout_session).fallback(handlers::method_not_allowed),
        )
        .route("/success", get(handlers::checkout_success))
        .route("/health", get(handlers::health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
