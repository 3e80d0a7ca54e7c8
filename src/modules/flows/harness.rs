use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::models::StepOutcome;
use crate::config::E2eConfig;
use crate::core::{E2eError, Result};
use crate::modules::client::{ApiResponse, Credential, PaymentsClient};
use crate::modules::fixtures::{check_response, ExpectedResponse, FixtureResolver, ScenarioFixture};
use crate::modules::state::{keys, SharedState};

/// Step operations against the payments service
///
/// Holds the injected client, the fixture tables and configuration; every step
/// takes the shared state explicitly.
pub struct Harness<C> {
    pub(super) client: C,
    pub(super) fixtures: Arc<FixtureResolver>,
    pub(super) config: E2eConfig,
}

impl<C: PaymentsClient> Harness<C> {
    /// Harness over the built-in fixture tables, shared with every other harness
    pub fn new(client: C, config: E2eConfig) -> Self {
        Self::with_fixtures(client, config, FixtureResolver::shared())
    }

    pub fn with_fixtures(client: C, config: E2eConfig, fixtures: impl Into<Arc<FixtureResolver>>) -> Self {
        Self {
            client,
            fixtures: fixtures.into(),
            config,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &E2eConfig {
        &self.config
    }

    pub fn fixtures(&self) -> &FixtureResolver {
        &self.fixtures
    }

    /// Connector under test: the state's value wins over configuration
    pub(super) fn connector_id(&self, state: &SharedState) -> String {
        state
            .get_str(keys::CONNECTOR_ID)
            .map(str::to_lowercase)
            .unwrap_or_else(|| self.config.connector_id.clone())
    }

    pub(super) fn scenario(&self, connector: &str, category: &str, name: &str) -> Option<&ScenarioFixture> {
        self.fixtures.scenario_for(connector, category, name)
    }

    /// Flat scenario, or the `sub_method` variant of a factory when one is given
    pub(super) fn scenario_variant(
        &self,
        connector: &str,
        category: &str,
        name: &str,
        sub_method: Option<&str>,
    ) -> Option<&ScenarioFixture> {
        let table = self.fixtures.resolve(connector)?;
        match sub_method {
            Some(sub_method) => table.variant(category, name, sub_method),
            None => table.scenario(category, name),
        }
    }

    pub(super) fn not_configured(&self, connector: &str, category: &str, name: &str) -> StepOutcome {
        warn!(
            connector = %connector,
            category = %category,
            scenario = %name,
            "Scenario not configured for connector, skipping"
        );
        StepOutcome::skipped(format!("{}.{} not configured for {}", category, name, connector))
    }

    pub(super) fn admin(&self, state: &SharedState) -> Credential {
        Credential::Admin(
            state
                .get_str(keys::ADMIN_API_KEY)
                .map(str::to_owned)
                .unwrap_or_else(|| self.config.service.admin_api_key.clone()),
        )
    }

    pub(super) fn secret(&self, state: &SharedState) -> Result<Credential> {
        Ok(Credential::Secret(state.require_str(keys::API_KEY)?))
    }

    pub(super) fn publishable(&self, state: &SharedState) -> Result<Credential> {
        Ok(Credential::Publishable(state.require_str(keys::PUBLISHABLE_KEY)?))
    }

    pub(super) fn return_url(&self) -> &str {
        &self.config.redirect.return_url
    }

    pub(super) async fn post_checked(
        &self,
        path: &str,
        credential: &Credential,
        body: Map<String, Value>,
        expected: &ExpectedResponse,
    ) -> Result<ApiResponse> {
        let response = self.client.post(path, credential, &Value::Object(body)).await?;
        log_response("POST", path, &response);
        check_response(response.status, &response.body, expected)?;
        Ok(response)
    }

    pub(super) async fn get_checked(
        &self,
        path: &str,
        credential: &Credential,
        expected: &ExpectedResponse,
    ) -> Result<ApiResponse> {
        let response = self.client.get(path, credential).await?;
        log_response("GET", path, &response);
        check_response(response.status, &response.body, expected)?;
        Ok(response)
    }

    pub(super) async fn delete_checked(
        &self,
        path: &str,
        credential: &Credential,
        expected: &ExpectedResponse,
    ) -> Result<ApiResponse> {
        let response = self.client.delete(path, credential).await?;
        log_response("DELETE", path, &response);
        check_response(response.status, &response.body, expected)?;
        Ok(response)
    }
}

fn log_response(method: &str, path: &str, response: &ApiResponse) {
    info!(
        method,
        path,
        status = response.status,
        payment_status = response.str_field("status").unwrap_or("-"),
        "Payments service responded"
    );
}

/// Copy a string field of the response into state, if present
pub(super) fn record_str(state: &mut SharedState, key: &str, response: &ApiResponse, field: &str) {
    if let Some(value) = response.str_field(field) {
        state.set(key, value);
    }
}

/// Record the payment status and any pending redirect
pub(super) fn record_payment(state: &mut SharedState, response: &ApiResponse) {
    record_str(state, keys::PAYMENT_STATUS, response, "status");

    let redirect = response
        .body
        .pointer("/next_action/redirect_to_url")
        .and_then(Value::as_str);
    match redirect {
        Some(url) => state.set(keys::NEXT_ACTION_URL, url),
        None => state.delete(keys::NEXT_ACTION_URL),
    }
}

/// Record identifiers of a newly created payment
pub(super) fn record_created_payment(state: &mut SharedState, response: &ApiResponse) {
    record_str(state, keys::PAYMENT_ID, response, "payment_id");
    record_str(state, keys::CLIENT_SECRET, response, "client_secret");
    if let Some(amount) = response.body.get("amount").and_then(Value::as_i64) {
        state.set(keys::PAYMENT_AMOUNT, amount);
    }
    record_payment(state, response);
}

/// Expected response with extra exact-match fields added to the body
pub(super) fn expect_ok_with<I>(fields: I) -> ExpectedResponse
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let mut expected = ExpectedResponse::ok();
    for (key, value) in fields {
        expected.body.insert(key.to_string(), value);
    }
    expected
}

/// Request path with a percent-encoded query string
pub(super) fn path_with_query(path: &str, params: &[(&str, &str)]) -> Result<String> {
    let url = reqwest::Url::parse_with_params(&format!("http://payments.invalid{}", path), params)
        .map_err(|e| E2eError::configuration(format!("invalid request path '{}': {}", path, e)))?;
    Ok(match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    })
}

pub(super) fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}
