//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API: create a hosted
//! session for the configured price, and retrieve one by id when the browser
//! comes back.

use crate::config::StripeConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutProvider, CheckoutSessionParams, CheckoutSessionResult, PaymentError, PaymentResult,
    SessionStatus, SessionStatusView,
};
use chrono::DateTime;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

const PROVIDER: &str = "stripe";

/// Objects expanded when a session is retrieved
const SESSION_EXPANSIONS: [&str; 2] = ["line_items", "payment_intent"];

/// Stripe Checkout Session provider
///
/// Uses Stripe's hosted checkout page, so card data never touches this server.
pub struct StripeCheckout {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckout {
    /// Create a new Stripe checkout provider
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PaymentError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        let config = StripeConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    /// Absolute API URL for the given path segments; segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> PaymentResult<Url> {
        let mut url = Url::parse(&self.config.api_base_url).map_err(|e| {
            PaymentError::Configuration(format!("Invalid Stripe API base URL: {e}"))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                PaymentError::Configuration("Stripe API base URL cannot carry a path".to_string())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Build form data for the create-session call
    fn session_form(params: &CheckoutSessionParams) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("line_items[0][price]".to_string(), params.price_id.clone()),
            (
                "line_items[0][quantity]".to_string(),
                params.quantity.to_string(),
            ),
        ];

        for (i, method) in params.payment_methods.iter().enumerate() {
            form_params.push((
                format!("payment_method_types[{}]", i),
                method.as_str().to_string(),
            ));
        }

        form_params.push(("success_url".to_string(), params.success_url.clone()));
        form_params.push(("cancel_url".to_string(), params.cancel_url.clone()));
        form_params
    }
}

/// Turn a Stripe HTTP response into a typed body or a `PaymentError`.
async fn read_response<T: DeserializeOwned>(response: Response) -> PaymentResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

    if !status.is_success() {
        error!("Stripe API error: status={}, body={}", status, body);

        // Parse Stripe error
        let message = match serde_json::from_str::<StripeErrorResponse>(&body) {
            Ok(error_response) => error_response.error.message,
            Err(_) => format!("HTTP {}: {}", status, body),
        };

        return Err(PaymentError::ProviderError {
            provider: PROVIDER.to_string(),
            status: Some(status.as_u16()),
            message,
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
    })
}

#[async_trait]
impl CheckoutProvider for StripeCheckout {
    #[instrument(skip(self, params), fields(methods = params.payment_methods.len()))]
    async fn create_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> PaymentResult<CheckoutSessionResult> {
        if params.payment_methods.is_empty() {
            return Err(PaymentError::InvalidRequest(
                "No payment methods requested".to_string(),
            ));
        }

        let url = self.endpoint(&["v1", "checkout", "sessions"])?;
        let form_params = Self::session_form(params);

        debug!("Creating Stripe checkout session: {} form fields", form_params.len());

        let response = self
            .client
            .post(url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let session: StripeCheckoutSessionResponse = read_response(response).await?;

        let redirect_url = session.url.ok_or_else(|| PaymentError::ProviderError {
            provider: PROVIDER.to_string(),
            status: None,
            message: format!("Checkout session {} has no hosted URL", session.id),
        })?;

        info!("Created Stripe checkout session: id={}", session.id);
        debug!("Hosted checkout URL: {}", redirect_url);

        Ok(CheckoutSessionResult {
            session_id: session.id,
            redirect_url,
            expires_at: session
                .expires_at
                .and_then(|ts| DateTime::from_timestamp(ts, 0)),
        })
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, session_id: &str) -> PaymentResult<SessionStatusView> {
        let url = self.endpoint(&["v1", "checkout", "sessions", session_id])?;
        let expand: Vec<(&str, &str)> = SESSION_EXPANSIONS
            .iter()
            .map(|field| ("expand[]", *field))
            .collect();

        let response = self
            .client
            .get(url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .query(&expand)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let session: StripeSessionStatusResponse = read_response(response).await?;

        let status = session.status.ok_or_else(|| {
            PaymentError::Serialization(format!("Checkout session {} has no status", session.id))
        })?;

        debug!(
            "Retrieved Stripe checkout session: id={}, status={}, payment_status={:?}",
            session.id, status, session.payment_status
        );

        Ok(SessionStatusView {
            status: SessionStatus::from_provider(&status),
            customer_email: session.customer_details.and_then(|details| details.email),
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeSessionStatusResponse {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    customer_details: Option<StripeCustomerDetails>,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerDetails {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{PaymentMethod, ALL_PAYMENT_METHODS};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> StripeCheckout {
        let config = StripeConfig::new("sk_test_123", "price_1ABC").with_api_base_url(server.uri());
        StripeCheckout::new(config).unwrap()
    }

    fn params(methods: Vec<PaymentMethod>) -> CheckoutSessionParams {
        CheckoutSessionParams {
            price_id: "price_1ABC".into(),
            quantity: 1,
            payment_methods: methods,
            success_url: "https://shop.test/success?session_id={CHECKOUT_SESSION_ID}".into(),
            cancel_url: "https://shop.test/?canceled=true".into(),
        }
    }

    /// Decoded form fields of the only request the server received
    async fn received_form(server: &MockServer) -> Vec<(String, String)> {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8(requests[0].body.clone()).unwrap();
        Url::parse(&format!("http://form.invalid/?{}", body))
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_session_form_fields() {
        let form = StripeCheckout::session_form(&params(vec![PaymentMethod::Klarna]));

        assert!(form.contains(&("mode".into(), "payment".into())));
        assert!(form.contains(&("line_items[0][price]".into(), "price_1ABC".into())));
        assert!(form.contains(&("line_items[0][quantity]".into(), "1".into())));
        assert!(form.contains(&("payment_method_types[0]".into(), "klarna".into())));
        assert!(!form.iter().any(|(k, _)| k == "payment_method_types[1]"));
    }

    #[test]
    fn test_endpoint_encodes_session_id() {
        let config = StripeConfig::new("sk_test_123", "price_1").with_api_base_url("http://localhost:12111");
        let provider = StripeCheckout::new(config).unwrap();

        let url = provider
            .endpoint(&["v1", "checkout", "sessions", "cs_1/../../v1/customers"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:12111/v1/checkout/sessions/cs_1%2F..%2F..%2Fv1%2Fcustomers"
        );
    }

    #[tokio::test]
    async fn test_create_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("authorization", "Bearer sk_test_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_a1",
                "object": "checkout.session",
                "url": "https://checkout.stripe.com/c/pay/cs_test_a1",
                "expires_at": 1735689600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let session = provider
            .create_session(&params(ALL_PAYMENT_METHODS.to_vec()))
            .await
            .unwrap();

        assert_eq!(session.session_id, "cs_test_a1");
        assert_eq!(session.redirect_url, "https://checkout.stripe.com/c/pay/cs_test_a1");
        assert_eq!(session.expires_at.map(|t| t.timestamp()), Some(1735689600));

        let form = received_form(&server).await;
        let methods: Vec<_> = form
            .iter()
            .filter(|(k, _)| k.starts_with("payment_method_types"))
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(methods, ["card", "klarna", "paypal"]);
        assert!(form.contains(&(
            "success_url".into(),
            "https://shop.test/success?session_id={CHECKOUT_SESSION_ID}".into()
        )));
    }

    #[tokio::test]
    async fn test_create_session_card_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(402).set_body_json(json!({
                "error": {
                    "type": "card_error",
                    "message": "Your card was declined."
                }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .create_session(&params(vec![PaymentMethod::Card]))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 402);
        assert_eq!(err.client_message(), "Your card was declined.");
    }

    #[tokio::test]
    async fn test_create_session_unparseable_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .create_session(&params(vec![PaymentMethod::Card]))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 503);
        assert!(err.client_message().contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn test_create_session_network_error() {
        let config = StripeConfig::new("sk_test_123", "price_1").with_api_base_url("http://127.0.0.1:1");
        let provider = StripeCheckout::new(config).unwrap();

        let err = provider
            .create_session(&params(vec![PaymentMethod::Card]))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::NetworkError(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_create_session_requires_methods() {
        let server = MockServer::start().await;
        let err = provider_for(&server)
            .create_session(&params(Vec::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, PaymentError::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retrieve_complete_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_a1"))
            .and(query_param("expand[]", "line_items"))
            .and(query_param("expand[]", "payment_intent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_a1",
                "object": "checkout.session",
                "status": "complete",
                "payment_status": "paid",
                "customer_details": { "email": "a@b.com", "name": "A B" },
                "line_items": { "object": "list", "data": [] },
                "payment_intent": { "id": "pi_123", "status": "succeeded" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let view = provider_for(&server)
            .retrieve_session("cs_test_a1")
            .await
            .unwrap();

        assert_eq!(view.status, SessionStatus::Complete);
        assert_eq!(view.customer_email.as_deref(), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_retrieve_open_session_without_customer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_open",
                "status": "open",
                "customer_details": null
            })))
            .mount(&server)
            .await;

        let view = provider_for(&server)
            .retrieve_session("cs_test_open")
            .await
            .unwrap();

        assert_eq!(view.status, SessionStatus::Open);
        assert_eq!(view.customer_email, None);
    }

    #[tokio::test]
    async fn test_retrieve_unknown_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "type": "invalid_request_error",
                    "message": "No such checkout.session: 'bogus'"
                }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .retrieve_session("bogus")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 404);
    }
}
