//! # checkout-stripe
//!
//! Stripe provider for method-checkout, built on the Checkout Sessions API.
//!
//! - **Create**: opens a hosted session for the configured price, limited to
//!   the validated payment-method list.
//! - **Retrieve**: looks a session up by id (expanding line items and the
//!   payment intent) to read its status and the payer's email.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_core::{create_checkout_session, CheckoutProvider};
//! use checkout_stripe::StripeCheckout;
//!
//! // Create provider from environment
//! let stripe = StripeCheckout::from_env()?;
//! let price_id = stripe.config().price_id.clone();
//!
//! let session = create_checkout_session(&stripe, &price_id, Some("card"), "https://shop.example.com").await?;
//!
//! // Redirect user to session.redirect_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckout;
pub use config::StripeConfig;
