//! # Checkout Flow
//!
//! The two operations of the storefront:
//!
//! ```text
//!  selection form ──POST──▶ create_checkout_session ──▶ provider-hosted page
//!                                                            │
//!  start page ◀── Redirect ── resolve_session ◀──session_id──┘
//!                     │
//!                     └── Confirmed(view) ──▶ confirmation page
//! ```
//!
//! The session itself only ever changes state inside the provider; this
//! module observes a snapshot and branches on it.

use crate::error::PaymentResult;
use crate::method::MethodSelection;
use crate::provider::CheckoutProvider;
use crate::session::{
    CheckoutSessionParams, CheckoutSessionResult, CheckoutUrls, SessionResolution, SessionStatus,
};
use tracing::{debug, info, instrument, warn};

/// Build the provider request for a validated selection.
pub fn session_params(
    price_id: &str,
    selection: MethodSelection,
    urls: &CheckoutUrls,
) -> CheckoutSessionParams {
    CheckoutSessionParams {
        price_id: price_id.to_string(),
        quantity: 1,
        payment_methods: selection.methods(),
        success_url: urls.success_url(),
        cancel_url: urls.cancel_url(),
    }
}

/// Open a hosted checkout session for an untrusted method selection.
///
/// A single provider call is made; failures are returned as-is, never retried.
#[instrument(skip(provider, price_id), fields(provider_name = provider.provider_name()))]
pub async fn create_checkout_session(
    provider: &dyn CheckoutProvider,
    price_id: &str,
    selected_method: Option<&str>,
    origin: &str,
) -> PaymentResult<CheckoutSessionResult> {
    let selection = MethodSelection::from_untrusted(selected_method);
    let params = session_params(price_id, selection, &CheckoutUrls::new(origin));

    debug!(
        "Creating checkout session: methods={:?}, success_url={}",
        params.payment_methods, params.success_url
    );

    let session = provider.create_session(&params).await?;

    info!("Created checkout session: {}", session.session_id);
    Ok(session)
}

/// Decide what a returning browser sees.
///
/// Never fails: a missing id, a lookup error or a still-open session all
/// resolve to [`SessionResolution::Redirect`].
#[instrument(skip(provider), fields(provider_name = provider.provider_name()))]
pub async fn resolve_session(
    provider: &dyn CheckoutProvider,
    session_id: Option<&str>,
) -> SessionResolution {
    let Some(session_id) = session_id.filter(|id| !id.is_empty()) else {
        debug!("No session id, redirecting to start");
        return SessionResolution::Redirect;
    };

    let view = match provider.retrieve_session(session_id).await {
        Ok(view) => view,
        Err(e) => {
            warn!("Session lookup failed for {}: {}", session_id, e);
            return SessionResolution::Redirect;
        }
    };

    if view.status == SessionStatus::Open {
        debug!("Session {} still open, redirecting to start", session_id);
        return SessionResolution::Redirect;
    }

    info!("Resolved session {}: status={}", session_id, view.status);
    SessionResolution::Confirmed(view)
}
