use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use super::models::{ConnectorFixtureTable, ScenarioFixture};
use crate::core::{E2eError, Result};

const BUILTIN_TABLES: &[(&str, &str)] = &[
    ("adyen", include_str!("data/adyen.yaml")),
    ("cybersource", include_str!("data/cybersource.yaml")),
    ("stripe", include_str!("data/stripe.yaml")),
];

static BUILTIN: OnceLock<Arc<FixtureResolver>> = OnceLock::new();

/// Registry of connector fixture tables keyed by lower-cased connector id
#[derive(Debug, Clone, Default)]
pub struct FixtureResolver {
    tables: HashMap<String, ConnectorFixtureTable>,
}

impl FixtureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables shipped with the crate, parsed once per process
    ///
    /// # Panics
    /// If an embedded table is malformed. The tables are compiled in, so this
    /// can only happen on a broken build and the contract tests catch it.
    pub fn builtin() -> &'static FixtureResolver {
        Self::builtin_arc()
    }

    /// Handle on the built-in tables; every handle points at the same parse
    pub fn shared() -> Arc<FixtureResolver> {
        Arc::clone(Self::builtin_arc())
    }

    fn builtin_arc() -> &'static Arc<FixtureResolver> {
        BUILTIN.get_or_init(|| match Self::parse_builtin() {
            Ok(resolver) => Arc::new(resolver),
            Err(e) => panic!("embedded fixture tables are invalid: {}", e),
        })
    }

    /// Parse the embedded tables without caching
    pub fn parse_builtin() -> Result<Self> {
        let mut resolver = Self::new();
        for (connector, raw) in BUILTIN_TABLES {
            let table = parse_table(connector, raw)?;
            resolver.register(connector, table);
        }
        info!(connectors = resolver.tables.len(), "Loaded connector fixture tables");
        Ok(resolver)
    }

    pub fn from_tables<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = (S, ConnectorFixtureTable)>,
        S: AsRef<str>,
    {
        let mut resolver = Self::new();
        for (connector, table) in tables {
            resolver.register(connector.as_ref(), table);
        }
        resolver
    }

    /// Register a table, replacing any table already held for the connector
    pub fn register(&mut self, connector_id: &str, table: ConnectorFixtureTable) {
        self.tables.insert(connector_id.to_lowercase(), table);
    }

    /// Table for a connector; `None` means the connector is not configured and
    /// dependent steps should skip
    pub fn resolve(&self, connector_id: &str) -> Option<&ConnectorFixtureTable> {
        let table = self.tables.get(&connector_id.to_lowercase());
        if table.is_none() {
            debug!(connector = %connector_id, "No fixture table for connector");
        }
        table
    }

    /// Connector and scenario lookup in one call
    pub fn scenario_for(&self, connector_id: &str, category: &str, name: &str) -> Option<&ScenarioFixture> {
        self.resolve(connector_id)
            .and_then(|table| resolve_scenario(table, category, name))
    }

    pub fn connectors(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Category/scenario lookup within one connector table
pub fn resolve_scenario<'a>(
    table: &'a ConnectorFixtureTable,
    category: &str,
    name: &str,
) -> Option<&'a ScenarioFixture> {
    table.scenario(category, name)
}

/// Parse one YAML fixture table
pub fn parse_table(connector: &str, raw: &str) -> Result<ConnectorFixtureTable> {
    serde_yaml::from_str(raw).map_err(|source| E2eError::FixtureParse {
        connector: connector.to_string(),
        source,
    })
}
