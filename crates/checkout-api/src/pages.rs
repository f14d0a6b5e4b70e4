//! # Pages
//!
//! Server-rendered HTML for the selection form and the confirmation page.
//! Templates are compiled into the binary; handlebars escapes every value.

use checkout_core::{
    PaymentError, PaymentMethodDescriptor, PaymentResult, SessionStatusView, ALL_METHODS_ID,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::sync::Arc;

const INDEX_TEMPLATE: &str = "index";
const SUCCESS_TEMPLATE: &str = "success";

#[derive(Debug, Serialize)]
struct MethodRow<'a> {
    id: &'a str,
    label: &'a str,
    description: &'a str,
    checked: bool,
}

#[derive(Debug, Serialize)]
struct IndexPage<'a> {
    methods: Vec<MethodRow<'a>>,
    canceled: bool,
}

#[derive(Debug, Serialize)]
struct SuccessPage<'a> {
    complete: bool,
    customer_email: Option<&'a str>,
    support_email: &'a str,
}

/// Compiled page templates, shared by all requests
#[derive(Clone)]
pub struct PageRenderer {
    handlebars: Arc<Handlebars<'static>>,
}

impl PageRenderer {
    pub fn new() -> PaymentResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string(INDEX_TEMPLATE, include_str!("../templates/index.hbs"))
            .map_err(|e| PaymentError::Template(e.to_string()))?;
        handlebars
            .register_template_string(SUCCESS_TEMPLATE, include_str!("../templates/success.hbs"))
            .map_err(|e| PaymentError::Template(e.to_string()))?;

        Ok(Self {
            handlebars: Arc::new(handlebars),
        })
    }

    /// Selection form; the "all" entry starts selected.
    pub fn index(
        &self,
        methods: &[PaymentMethodDescriptor],
        canceled: bool,
    ) -> PaymentResult<String> {
        let page = IndexPage {
            methods: methods
                .iter()
                .map(|m| MethodRow {
                    id: m.id,
                    label: m.label,
                    description: m.description,
                    checked: m.id == ALL_METHODS_ID,
                })
                .collect(),
            canceled,
        };
        self.render(INDEX_TEMPLATE, &page)
    }

    /// Confirmation page; the message only appears for a completed session.
    pub fn success(&self, view: &SessionStatusView, support_email: &str) -> PaymentResult<String> {
        let page = SuccessPage {
            complete: view.status.is_complete(),
            customer_email: view.customer_email.as_deref(),
            support_email,
        };
        self.render(SUCCESS_TEMPLATE, &page)
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> PaymentResult<String> {
        self.handlebars
            .render(name, data)
            .map_err(|e| PaymentError::Template(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{SessionStatus, PAYMENT_METHODS};

    fn view(status: SessionStatus, email: Option<&str>) -> SessionStatusView {
        SessionStatusView {
            status,
            customer_email: email.map(String::from),
        }
    }

    #[test]
    fn test_index_lists_every_method() {
        let html = PageRenderer::new().unwrap().index(&PAYMENT_METHODS, false).unwrap();

        for method in PAYMENT_METHODS.iter() {
            assert!(html.contains(&format!("value=\"{}\"", method.id)));
            assert!(html.contains(method.label));
            assert!(html.contains(method.description));
        }
        assert!(html.contains("value=\"all\" checked"));
        assert!(!html.contains("Order canceled"));
    }

    #[test]
    fn test_index_canceled_notice() {
        let html = PageRenderer::new().unwrap().index(&PAYMENT_METHODS, true).unwrap();
        assert!(html.contains("Order canceled"));
    }

    #[test]
    fn test_success_complete() {
        let html = PageRenderer::new()
            .unwrap()
            .success(&view(SessionStatus::Complete, Some("a@b.com")), "orders@example.com")
            .unwrap();

        assert!(html.contains("A confirmation email will be sent to a@b.com"));
        assert!(html.contains("mailto:orders@example.com"));
    }

    #[test]
    fn test_success_not_complete_renders_nothing() {
        let html = PageRenderer::new()
            .unwrap()
            .success(&view(SessionStatus::Other("expired".into()), Some("a@b.com")), "orders@example.com")
            .unwrap();

        assert!(!html.contains("id=\"success\""));
        assert!(!html.contains("a@b.com"));
    }

    #[test]
    fn test_success_escapes_email() {
        let html = PageRenderer::new()
            .unwrap()
            .success(
                &view(SessionStatus::Complete, Some("<script>x</script>@b.com")),
                "orders@example.com",
            )
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
