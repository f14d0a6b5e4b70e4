//! # Method Checkout
//!
//! Storefront checkout with a selectable payment method, backed by Stripe
//! hosted checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PRICE_ID=price_...
//!
//! # Run the server
//! method-checkout
//! ```

use checkout_api::{routes, state::AppState};
use checkout_core::CheckoutProvider;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Payment provider: {}",
        CheckoutProvider::provider_name(state.provider.as_ref())
    );

    // Create router
    let app = routes::create_router(state);

    info!("Method Checkout v{} starting on http://{}", env!("CARGO_PKG_VERSION"), addr);

    if !is_prod {
        info!("Storefront: http://{}/", addr);
        info!("Checkout: POST http://{}{}", addr, routes::CHECKOUT_SESSION_PATH);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
