//! HTTP dispatch
//!
//! The runner only needs a status code and a JSON body back, so the
//! transport sits behind the [`Dispatcher`] trait. Tests substitute a
//! canned implementation; production uses the blocking `reqwest` client.

use crate::config::HttpConfig;
use crate::model::{Request, ResponseEnvelope};
use apiassert_core::{log_op_end, log_op_error, log_op_start};
use apiassert_core::{AssertError, Result};
use apiassert_core_types::sensitive::display_header_value;
use apiassert_core_types::Sensitive;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;

/// Status and decoded body of one exchange
#[derive(Debug, Clone, PartialEq)]
pub struct HttpExchange {
    pub status: u16,
    /// `null` when the response had no body
    pub body: Value,
}

impl HttpExchange {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// The body as a response envelope, if it has that shape
    pub fn envelope(&self) -> Option<ResponseEnvelope> {
        ResponseEnvelope::from_body(&self.body)
    }
}

/// Send a fixture request and return the exchange.
pub trait Dispatcher: Send + Sync {
    /// Send `request`.
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Dispatch`] if the request cannot be sent or the
    /// response body is not JSON.
    fn send(&self, request: &Request) -> Result<HttpExchange>;
}

/// Blocking `reqwest` transport
#[derive(Debug)]
pub struct ReqwestDispatcher {
    client: Client,
    base_url: Option<String>,
    auth_token: Option<Sensitive<String>>,
}

impl ReqwestDispatcher {
    /// Build a client from the `[http]` configuration
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Config`] if the client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AssertError::Config {
                reason: format!("failed to build HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// Absolute URL for a fixture URL
    ///
    /// # Errors
    ///
    /// Returns [`AssertError::Dispatch`] for a relative URL with no base URL.
    pub fn resolve_url(&self, url: &str) -> Result<String> {
        join_url(self.base_url.as_deref(), url)
    }

    fn send_impl(&self, request: &Request, url: &str) -> Result<HttpExchange> {
        let dispatch_err = |reason: String| AssertError::Dispatch {
            url: url.to_string(),
            reason,
        };

        let method = Method::from_bytes(request.method.trim().to_ascii_uppercase().as_bytes())
            .map_err(|_| dispatch_err(format!("invalid HTTP method `{}`", request.method)))?;

        let mut builder = self.client.request(method, url);
        for (name, value) in &request.headers {
            tracing::debug!(
                header = %name,
                value = %display_header_value(name, value),
                "request header"
            );
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = &self.auth_token {
            if !request.has_header(AUTHORIZATION.as_str()) {
                builder = builder.header(AUTHORIZATION, token.expose().as_str());
            }
        }
        if let Some(body) = request.body_text() {
            let is_json = !matches!(request.body, Some(Value::String(_)));
            if is_json && !request.has_header(CONTENT_TYPE.as_str()) {
                builder = builder.header(CONTENT_TYPE, "application/json");
            }
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .map_err(|e| dispatch_err(format!("request failed: {}", e)))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| dispatch_err(format!("failed to read response: {}", e)))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)
                .map_err(|e| dispatch_err(format!("response body is not JSON: {}", e)))?
        };

        Ok(HttpExchange { status, body })
    }
}

impl Dispatcher for ReqwestDispatcher {
    fn send(&self, request: &Request) -> Result<HttpExchange> {
        let url = self.resolve_url(&request.url)?;
        log_op_start!("send_request", method = %request.method, url = %url);
        let start = std::time::Instant::now();

        let exchange = self.send_impl(request, &url).map_err(|e| {
            log_op_error!(
                "send_request",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "send_request",
            duration_ms = start.elapsed().as_millis() as u64,
            status = exchange.status
        );
        Ok(exchange)
    }
}

fn join_url(base: Option<&str>, url: &str) -> Result<String> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        return Ok(url.to_string());
    }
    match base {
        Some(base) => Ok(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            url.trim_start_matches('/')
        )),
        None => Err(AssertError::Dispatch {
            url: url.to_string(),
            reason: "relative URL and no http.base_url configured".to_string(),
        }),
    }
}
