//! # Payment Methods
//!
//! Static registry of the payment methods offered on the selection page,
//! and the closed set of method identifiers accepted by the provider.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the pseudo-method meaning "offer every method".
pub const ALL_METHODS_ID: &str = "all";

/// A payment instrument type the hosted checkout page can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Klarna,
    Paypal,
}

impl PaymentMethod {
    /// Wire identifier, as sent to the provider
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Klarna => "klarna",
            PaymentMethod::Paypal => "paypal",
        }
    }

    /// Exact, case-sensitive lookup of a singular method identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        ALL_PAYMENT_METHODS
            .iter()
            .copied()
            .find(|method| method.as_str() == id)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every method the provider is allowed to offer, in request order.
pub const ALL_PAYMENT_METHODS: [PaymentMethod; 3] = [
    PaymentMethod::Card,
    PaymentMethod::Klarna,
    PaymentMethod::Paypal,
];

/// Display metadata for one entry on the selection page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentMethodDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Selection page entries, in display order.
pub const PAYMENT_METHODS: [PaymentMethodDescriptor; 4] = [
    PaymentMethodDescriptor {
        id: "card",
        label: "Card Payment",
        description: "Pay with Credit or Debit Card",
    },
    PaymentMethodDescriptor {
        id: "paypal",
        label: "PayPal",
        description: "Pay with your PayPal account",
    },
    PaymentMethodDescriptor {
        id: "klarna",
        label: "Klarna",
        description: "Pay later with Klarna",
    },
    PaymentMethodDescriptor {
        id: ALL_METHODS_ID,
        label: "All Payment Methods",
        description: "All payments",
    },
];

/// The validated form of a client-submitted `paymentMethod` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSelection {
    Single(PaymentMethod),
    All,
}

impl MethodSelection {
    /// Validate an untrusted selection.
    ///
    /// Only an exact singular identifier narrows the list; anything else,
    /// including `"all"`, an empty string or no value at all, selects every
    /// method.
    pub fn from_untrusted(raw: Option<&str>) -> Self {
        match raw.and_then(PaymentMethod::from_id) {
            Some(method) => MethodSelection::Single(method),
            None => MethodSelection::All,
        }
    }

    /// Method list to request from the provider
    pub fn methods(&self) -> Vec<PaymentMethod> {
        match self {
            MethodSelection::Single(method) => vec![*method],
            MethodSelection::All => ALL_PAYMENT_METHODS.to_vec(),
        }
    }
}
