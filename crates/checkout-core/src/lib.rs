//! # checkout-core
//!
//! Core types and checkout flow for the method-checkout storefront.
//!
//! This crate provides:
//! - `PAYMENT_METHODS` registry and `MethodSelection` validation
//! - `CheckoutProvider` trait for hosted-checkout payment providers
//! - `create_checkout_session` and `resolve_session`, the two storefront operations
//! - `PaymentError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{create_checkout_session, resolve_session, SessionResolution};
//!
//! // Untrusted form value straight from the request body
//! let session = create_checkout_session(&provider, &price_id, Some("klarna"), origin).await?;
//!
//! // Redirect user to session.redirect_url (303)
//!
//! // Later, on /success?session_id=...
//! match resolve_session(&provider, Some(session_id)).await {
//!     SessionResolution::Confirmed(view) => render(view),
//!     SessionResolution::Redirect => redirect("/"),
//! }
//! ```

pub mod checkout;
pub mod error;
pub mod method;
pub mod provider;
pub mod session;

// Re-exports for convenience
pub use checkout::{create_checkout_session, resolve_session, session_params};
pub use error::{PaymentError, PaymentResult};
pub use method::{
    MethodSelection, PaymentMethod, PaymentMethodDescriptor, ALL_METHODS_ID, ALL_PAYMENT_METHODS,
    PAYMENT_METHODS,
};
pub use provider::{BoxedCheckoutProvider, CheckoutProvider};
pub use session::{
    CheckoutSessionParams, CheckoutSessionResult, CheckoutUrls, SessionResolution, SessionStatus,
    SessionStatusView, SESSION_ID_PLACEHOLDER,
};
