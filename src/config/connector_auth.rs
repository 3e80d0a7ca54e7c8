use crate::core::{E2eError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// Credentials for one connector, as sent on connector creation
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectorCredentials {
    pub connector_account_details: Map<String, Value>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Connector authentication file keyed by connector id
///
/// ```json
/// { "stripe": { "connector_account_details": { "auth_type": "HeaderKey", "api_key": "sk_test_..." } } }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConnectorAuth {
    connectors: HashMap<String, ConnectorCredentials>,
}

impl ConnectorAuth {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            E2eError::connector_auth(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
            .map_err(|e| E2eError::connector_auth(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: HashMap<String, ConnectorCredentials> = serde_json::from_str(raw)?;
        let connectors = parsed
            .into_iter()
            .map(|(id, creds)| (id.to_lowercase(), creds))
            .collect();
        Ok(Self { connectors })
    }

    /// Credentials for a connector, if the file configures it
    pub fn get(&self, connector_id: &str) -> Option<&ConnectorCredentials> {
        self.connectors.get(&connector_id.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}
