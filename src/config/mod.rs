use crate::core::{E2eError, Result};
use std::path::PathBuf;
use std::str::FromStr;

pub mod connector_auth;
pub mod redirect;
pub mod service;

pub use connector_auth::{ConnectorAuth, ConnectorCredentials};
pub use redirect::RedirectConfig;
pub use service::ServiceConfig;

pub const DEFAULT_CONNECTOR_ID: &str = "stripe";
pub const DEFAULT_STATE_PATH: &str = "target/e2e/shared_state.json";

/// Main harness configuration
#[derive(Debug, Clone)]
pub struct E2eConfig {
    pub service: ServiceConfig,
    pub redirect: RedirectConfig,
    /// Connector under test, normalised to lower case
    pub connector_id: String,
    pub connector_auth_file_path: Option<PathBuf>,
    /// Location of the shared state snapshot
    pub state_path: PathBuf,
    pub operator: Option<OperatorCredentials>,
}

/// Dashboard operator login, seeded into shared state for flows that need it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorCredentials {
    pub email: String,
    pub password: String,
}

impl E2eConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source
    ///
    /// Every variable is optional; absent ones fall back to defaults. Present but
    /// unparseable values are errors.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let operator = match (lookup("E2E_OPERATOR_EMAIL"), lookup("E2E_OPERATOR_PASSWORD")) {
            (Some(email), Some(password)) => Some(OperatorCredentials { email, password }),
            (None, None) => None,
            _ => {
                return Err(E2eError::configuration(
                    "E2E_OPERATOR_EMAIL and E2E_OPERATOR_PASSWORD must be set together",
                ))
            }
        };

        let config = E2eConfig {
            service: ServiceConfig::from_vars(&lookup)?,
            redirect: RedirectConfig::from_vars(&lookup)?,
            connector_id: lookup("E2E_CONNECTOR_ID")
                .unwrap_or_else(|| DEFAULT_CONNECTOR_ID.to_string())
                .to_lowercase(),
            connector_auth_file_path: lookup("E2E_CONNECTOR_AUTH_FILE_PATH").map(PathBuf::from),
            state_path: lookup("E2E_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
            operator,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.connector_id.trim().is_empty() {
            return Err(E2eError::configuration("E2E_CONNECTOR_ID must not be empty"));
        }

        self.service.validate()?;
        self.redirect.validate()?;

        Ok(())
    }
}

/// Parse an optional variable, falling back to `default` when absent
pub(crate) fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| E2eError::configuration(format!("Invalid {}: '{}'", name, raw))),
        None => Ok(default),
    }
}
