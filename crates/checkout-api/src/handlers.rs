//! # Request Handlers
//!
//! Axum request handlers for the storefront: selection page, checkout-session
//! endpoint and confirmation page.

use crate::state::AppState;
use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use checkout_core::{PaymentError, SessionResolution, PAYMENT_METHODS};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Selection form body
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    /// One of the registry ids; anything else means "all"
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: Option<String>,
}

/// Query of the start page
#[derive(Debug, Deserialize)]
pub struct IndexParams {
    #[serde(default)]
    pub canceled: Option<String>,
}

/// Query of the confirmation page
#[derive(Debug, Deserialize)]
pub struct SuccessParams {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn payment_error_to_response(err: PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.client_message());
    (StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR), Json(response))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "method-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Payment-method selection page
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<IndexParams>, QueryRejection>,
) -> Result<Html<String>, (StatusCode, Json<ErrorResponse>)> {
    let canceled = query
        .ok()
        .and_then(|Query(params)| params.canceled)
        .is_some_and(|c| !c.is_empty());

    if canceled {
        info!("Order canceled -- customer returned to the selection page");
    }

    state
        .pages
        .index(&PAYMENT_METHODS, canceled)
        .map(Html)
        .map_err(|e| {
            error!("Failed to render selection page: {}", e);
            payment_error_to_response(e)
        })
}

/// Create a hosted checkout session and send the browser to it (303)
#[instrument(skip(state, headers, form))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<CheckoutForm>, FormRejection>,
) -> Result<Redirect, (StatusCode, Json<ErrorResponse>)> {
    let selected = match form {
        Ok(Form(form)) => form.payment_method,
        Err(rejection) => {
            warn!("Unreadable checkout form, offering all methods: {}", rejection);
            None
        }
    };

    let request_origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok());
    let origin = state.origin_or_default(request_origin);

    let session = checkout_core::create_checkout_session(
        state.provider.as_ref(),
        &state.price_id,
        selected.as_deref(),
        origin,
    )
    .await
    .map_err(|e| {
        error!("Stripe error: {}", e);
        payment_error_to_response(e)
    })?;

    Ok(Redirect::to(&session.redirect_url))
}

/// Any verb other than POST on the checkout endpoint
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        Json(ErrorResponse::new("Method not allowed")),
    )
}

/// Confirmation page for a returning session
#[instrument(skip(state, query))]
pub async fn checkout_success(
    State(state): State<AppState>,
    query: Result<Query<SuccessParams>, QueryRejection>,
) -> Response {
    let session_id = query.ok().and_then(|Query(params)| params.session_id);

    let view = match checkout_core::resolve_session(state.provider.as_ref(), session_id.as_deref())
        .await
    {
        SessionResolution::Confirmed(view) => view,
        SessionResolution::Redirect => return Redirect::temporary("/").into_response(),
    };

    match state.pages.success(&view, &state.config.support_email) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Failed to render confirmation page: {}", e);
            payment_error_to_response(e).into_response()
        }
    }
}
