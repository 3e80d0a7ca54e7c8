use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Payment-method category names used as the first level of a fixture table
pub mod category {
    pub const CARD: &str = "card_pm";
    pub const BANK_TRANSFER: &str = "bank_transfer_pm";
    pub const BANK_REDIRECT: &str = "bank_redirect_pm";
    pub const UPI: &str = "upi_pm";
}

/// Expected response for one scenario
///
/// Only the keys present in `body` are checked against the actual response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExpectedResponse {
    pub status: u16,
    #[serde(default)]
    pub body: Map<String, Value>,
}

impl ExpectedResponse {
    /// Plain `200` with no body expectations
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: Map::new(),
        }
    }
}

/// Request overrides and expected response for one connector scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioFixture {
    #[serde(rename = "Request", default)]
    pub request: Map<String, Value>,
    #[serde(rename = "Response")]
    pub response: ExpectedResponse,
}

/// Category entry: a flat scenario, or a factory keyed by sub-method name
/// (bank transfer `Pix` vs `Ach`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenarioEntry {
    Fixture(ScenarioFixture),
    Variants(BTreeMap<String, ScenarioFixture>),
}

/// Every scenario configured for one connector, grouped by category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectorFixtureTable {
    pub categories: BTreeMap<String, BTreeMap<String, ScenarioEntry>>,
}

impl ConnectorFixtureTable {
    /// Flat scenario lookup; factories and missing levels resolve to `None`
    pub fn scenario(&self, category: &str, name: &str) -> Option<&ScenarioFixture> {
        match self.categories.get(category)?.get(name)? {
            ScenarioEntry::Fixture(fixture) => Some(fixture),
            ScenarioEntry::Variants(_) => None,
        }
    }

    /// Factory lookup parameterised by sub-method, e.g. `("bank_transfer_pm", "BankTransfer", "Pix")`
    pub fn variant(&self, category: &str, factory: &str, sub_method: &str) -> Option<&ScenarioFixture> {
        match self.categories.get(category)?.get(factory)? {
            ScenarioEntry::Variants(variants) => variants.get(sub_method),
            ScenarioEntry::Fixture(_) => None,
        }
    }

    /// Scenario names configured under a category
    pub fn scenario_names(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|entries| entries.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
