//! # checkout-api
//!
//! HTTP layer for method-checkout.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Server-rendered selection and confirmation pages
//! - The checkout-session endpoint that hands the browser to Stripe
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Payment-method selection form |
//! | POST | `/api/checkout_session` | Create checkout session (303 to Stripe) |
//! | GET | `/success?session_id=` | Confirmation page |
//! | GET | `/health` | Health check |

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
