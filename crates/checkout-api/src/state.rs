//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the checkout provider, the configured price, pages and configuration.

use crate::pages::PageRenderer;
use checkout_core::BoxedCheckoutProvider;
use checkout_stripe::StripeCheckout;
use std::net::SocketAddr;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Origin used for return URLs when a request carries no `Origin` header
    pub base_url: String,
    /// Address shown on the confirmation page
    pub support_email: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            support_email: std::env::var("SUPPORT_EMAIL")
                .unwrap_or_else(|_| "orders@example.com".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Hosted-checkout provider, built once and shared read-only
    pub provider: BoxedCheckoutProvider,
    /// Price of the single line item
    pub price_id: String,
    /// Page templates
    pub pages: PageRenderer,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let stripe = StripeCheckout::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;
        let price_id = stripe.config().price_id.clone();

        Self::with_provider(config, Arc::new(stripe), price_id)
    }

    /// Create an AppState around an already-built provider
    pub fn with_provider(
        config: AppConfig,
        provider: BoxedCheckoutProvider,
        price_id: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let pages = PageRenderer::new()
            .map_err(|e| anyhow::anyhow!("Failed to load page templates: {}", e))?;

        Ok(Self {
            provider,
            price_id: price_id.into(),
            pages,
            config,
        })
    }

    /// Origin for return URLs: the request's own, else the configured base URL
    pub fn origin_or_default<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        request_origin
            .map(str::trim)
            .filter(|o| !o.is_empty() && *o != "null")
            .unwrap_or(self.config.base_url.as_str())
    }
}
