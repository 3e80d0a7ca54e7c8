use async_trait::async_trait;
use reqwest::{header, Client, Method};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde_json::Value;
use tracing::{debug, warn};

use super::payments_client::{ApiResponse, Credential, PaymentsClient, API_KEY_HEADER};
use crate::config::ServiceConfig;
use crate::core::Result;

/// `PaymentsClient` over HTTP
pub struct ReqwestPaymentsClient {
    client: ClientWithMiddleware,
    config: ServiceConfig,
}

impl ReqwestPaymentsClient {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let inner = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let mut builder = ClientBuilder::new(inner);
        if config.max_retries > 0 {
            let policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
            builder = builder.with(RetryTransientMiddleware::new_with_policy(policy));
        }

        Ok(Self {
            client: builder.build(),
            config,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        credential: &Credential,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.config.url(path);
        let mut request = self
            .client
            .request(method.clone(), url.as_str())
            .header(header::ACCEPT, "application/json");

        if let Some(key) = credential.header_value() {
            request = request.header(API_KEY_HEADER, key);
        }
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(serde_json::to_vec(body)?);
        }

        debug!(method = %method, url = %url, tier = credential.tier(), "Sending request");

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let body = decode_body(&text);

        if status >= 500 {
            warn!(method = %method, url = %url, status, "Payments service returned server error");
        } else {
            debug!(method = %method, url = %url, status, "Received response");
        }

        Ok(ApiResponse::new(status, body))
    }
}

/// Empty bodies become `Null`; non-JSON bodies are kept as a string
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl PaymentsClient for ReqwestPaymentsClient {
    async fn get(&self, path: &str, credential: &Credential) -> Result<ApiResponse> {
        self.send(Method::GET, path, credential, None).await
    }

    async fn post(&self, path: &str, credential: &Credential, body: &Value) -> Result<ApiResponse> {
        self.send(Method::POST, path, credential, Some(body)).await
    }

    async fn delete(&self, path: &str, credential: &Credential) -> Result<ApiResponse> {
        self.send(Method::DELETE, path, credential, None).await
    }
}
