//! # Checkout Provider Trait
//!
//! Seam between the checkout flow and a hosted-checkout payment provider.
//! The only implementation today is Stripe (`checkout-stripe`); tests plug in
//! in-memory fakes.

use crate::error::PaymentResult;
use crate::session::{CheckoutSessionParams, CheckoutSessionResult, SessionStatusView};
use async_trait::async_trait;
use std::sync::Arc;

/// A payment provider able to host a checkout session.
///
/// Implementations are stateless from the caller's point of view and are
/// shared read-only across requests.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Open a hosted checkout session and return where to send the browser.
    async fn create_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<CheckoutSessionResult>;

    /// Look up a session's current status and the payer's email.
    async fn retrieve_session(&self, session_id: &str) -> PaymentResult<SessionStatusView>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedCheckoutProvider = Arc<dyn CheckoutProvider>;
