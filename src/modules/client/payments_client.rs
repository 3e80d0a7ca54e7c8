use async_trait::async_trait;
use serde_json::Value;

use crate::core::Result;

pub const API_KEY_HEADER: &str = "api-key";

/// Key presented to the payments service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Admin key: merchant accounts, API keys, connectors
    Admin(String),
    /// Merchant secret key: server-side payment operations
    Secret(String),
    /// Publishable key: client-side confirm with a client secret
    Publishable(String),
    None,
}

impl Credential {
    pub fn header_value(&self) -> Option<&str> {
        match self {
            Credential::Admin(key) | Credential::Secret(key) | Credential::Publishable(key) => {
                Some(key.as_str())
            }
            Credential::None => None,
        }
    }

    pub fn tier(&self) -> &'static str {
        match self {
            Credential::Admin(_) => "admin",
            Credential::Secret(_) => "secret",
            Credential::Publishable(_) => "publishable",
            Credential::None => "none",
        }
    }
}

/// Status and decoded body of a service response
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// String field of the body
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }
}

/// Request-performing capability for the payments service
///
/// Non-2xx responses are returned as `Ok`; only transport failures are errors.
#[async_trait]
pub trait PaymentsClient: Send + Sync {
    async fn get(&self, path: &str, credential: &Credential) -> Result<ApiResponse>;

    async fn post(&self, path: &str, credential: &Credential, body: &Value) -> Result<ApiResponse>;

    async fn delete(&self, path: &str, credential: &Credential) -> Result<ApiResponse>;
}
