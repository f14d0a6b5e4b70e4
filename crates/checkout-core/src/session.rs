//! # Checkout Session Types
//!
//! Request and response shapes exchanged with the payment provider, plus the
//! per-request views derived from them. Nothing here is persisted.

use crate::method::PaymentMethod;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder the provider substitutes with the real session id on redirect.
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Return URLs handed to the provider, derived from the request origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutUrls {
    /// Origin of the storefront (e.g., "https://shop.example.com")
    pub origin: String,
}

impl CheckoutUrls {
    pub fn new(origin: impl Into<String>) -> Self {
        let origin: String = origin.into();
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    /// Confirmation page, templated with the provider's session-id placeholder
    pub fn success_url(&self) -> String {
        format!("{}/success?session_id={}", self.origin, SESSION_ID_PLACEHOLDER)
    }

    /// Start page, flagged as canceled
    pub fn cancel_url(&self) -> String {
        format!("{}/?canceled=true", self.origin)
    }
}

/// Everything the provider needs to open a hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionParams {
    /// Pre-configured provider price identifier
    pub price_id: String,
    pub quantity: u32,
    /// Validated method list, never empty
    pub payment_methods: Vec<PaymentMethod>,
    pub success_url: String,
    pub cancel_url: String,
}

/// A freshly created hosted checkout session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSessionResult {
    pub session_id: String,
    /// Provider-hosted page the browser is sent to
    pub redirect_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Session lifecycle state as reported by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Complete,
    /// Anything else the provider reports (e.g. "expired"), kept verbatim
    Other(String),
}

impl SessionStatus {
    pub fn from_provider(raw: &str) -> Self {
        match raw {
            "open" => SessionStatus::Open,
            "complete" => SessionStatus::Complete,
            other => SessionStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SessionStatus::Open => "open",
            SessionStatus::Complete => "complete",
            SessionStatus::Other(raw) => raw,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SessionStatus::Complete)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a session, as needed by the confirmation page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatusView {
    pub status: SessionStatus,
    pub customer_email: Option<String>,
}

/// Outcome of looking up a returning session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResolution {
    /// Render the confirmation page for this snapshot
    Confirmed(SessionStatusView),
    /// Send the browser back to the start page
    Redirect,
}
