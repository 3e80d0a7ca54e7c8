use super::parse_var;
use crate::core::{E2eError, Result};
use std::time::Duration;

pub const DEFAULT_RETURN_URL: &str = "https://example.com/e2e/return";

/// Upper bounds for browser waits while following 3DS redirects
#[derive(Debug, Clone)]
pub struct RedirectConfig {
    pub page_load_timeout: Duration,
    pub element_timeout: Duration,
    pub redirect_timeout: Duration,
    /// `return_url` sent on confirm, also the pattern awaited after the challenge
    pub return_url: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            page_load_timeout: Duration::from_secs(30),
            element_timeout: Duration::from_secs(10),
            redirect_timeout: Duration::from_secs(45),
            return_url: DEFAULT_RETURN_URL.to_string(),
        }
    }
}

impl RedirectConfig {
    pub(crate) fn from_vars<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(RedirectConfig {
            page_load_timeout: Duration::from_secs(parse_var(lookup, "E2E_PAGE_LOAD_TIMEOUT_SECS", 30)?),
            element_timeout: Duration::from_secs(parse_var(lookup, "E2E_ELEMENT_TIMEOUT_SECS", 10)?),
            redirect_timeout: Duration::from_secs(parse_var(lookup, "E2E_REDIRECT_TIMEOUT_SECS", 45)?),
            return_url: lookup("E2E_RETURN_URL").unwrap_or_else(|| DEFAULT_RETURN_URL.to_string()),
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("page load", self.page_load_timeout),
            ("element", self.element_timeout),
            ("redirect", self.redirect_timeout),
        ] {
            if value.is_zero() {
                return Err(E2eError::configuration(format!(
                    "{} timeout must be greater than 0",
                    name
                )));
            }
        }

        Ok(())
    }
}
