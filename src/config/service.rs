use super::parse_var;
use crate::core::{E2eError, Result};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_ADMIN_API_KEY: &str = "test_admin";

/// Connection settings for the payments service under test
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub admin_api_key: String,
    pub request_timeout: Duration,
    /// Transient-failure retries per request, 0 disables the retry layer
    pub max_retries: u32,
}

impl ServiceConfig {
    pub fn new(base_url: impl Into<String>, admin_api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            admin_api_key: admin_api_key.into(),
            request_timeout: Duration::from_secs(30),
            max_retries: 0,
        }
    }

    pub(crate) fn from_vars<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(ServiceConfig {
            base_url: lookup("E2E_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            admin_api_key: lookup("E2E_ADMIN_API_KEY")
                .unwrap_or_else(|| DEFAULT_ADMIN_API_KEY.to_string()),
            request_timeout: Duration::from_secs(parse_var(lookup, "E2E_REQUEST_TIMEOUT_SECS", 30)?),
            max_retries: parse_var(lookup, "E2E_MAX_RETRIES", 0)?,
        })
    }

    /// Join a request path onto the base URL
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(E2eError::configuration(format!(
                "E2E_BASE_URL must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(E2eError::configuration(
                "Request timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}
