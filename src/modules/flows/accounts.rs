use std::path::PathBuf;

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use super::harness::{expect_ok_with, into_object, record_str, Harness};
use super::models::StepOutcome;
use crate::config::ConnectorAuth;
use crate::core::Result;
use crate::modules::client::PaymentsClient;
use crate::modules::fixtures::{build_request_body, overrides, request_bodies};
use crate::modules::state::{keys, SharedState};

impl<C: PaymentsClient> Harness<C> {
    /// Create a fresh merchant account and record its id, publishable key and
    /// default profile
    pub async fn merchant_create(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let merchant_id = request_bodies::random_merchant_id();
        let body = into_object(request_bodies::merchant_create(&merchant_id, self.return_url()));
        let expected = expect_ok_with([("merchant_id", json!(merchant_id))]);

        let response = self
            .post_checked("/accounts", &self.admin(state), body, &expected)
            .await?;

        state.set(keys::MERCHANT_ID, merchant_id.as_str());
        record_str(state, keys::PUBLISHABLE_KEY, &response, "publishable_key");
        record_str(state, keys::PROFILE_ID, &response, "default_profile");

        info!(merchant_id = %merchant_id, "Merchant account created");
        Ok(StepOutcome::proceed())
    }

    /// Create a secret API key for the recorded merchant
    pub async fn api_key_create(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let merchant_id = state.require_str(keys::MERCHANT_ID)?;
        let body = into_object(request_bodies::api_key_create());
        let expected = expect_ok_with([("merchant_id", json!(merchant_id))]);

        let response = self
            .post_checked(
                &format!("/api_keys/{}", merchant_id),
                &self.admin(state),
                body,
                &expected,
            )
            .await?;

        record_str(state, keys::API_KEY, &response, "api_key");
        record_str(state, keys::API_KEY_ID, &response, "key_id");
        Ok(StepOutcome::proceed())
    }

    pub async fn customer_create(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let customer_id = request_bodies::random_customer_id();
        let body = into_object(request_bodies::customer_create(&customer_id));
        let expected = expect_ok_with([("customer_id", json!(customer_id))]);

        self.post_checked("/customers", &self.secret(state)?, body, &expected)
            .await?;

        state.set(keys::CUSTOMER_ID, customer_id.as_str());
        Ok(StepOutcome::proceed())
    }

    /// Attach the connector under test to the merchant
    ///
    /// Skips when no connector auth file is configured or the file has no
    /// credentials for this connector.
    pub async fn connector_create(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(auth_path) = state.get_str(keys::CONNECTOR_AUTH_FILE_PATH).map(PathBuf::from) else {
            warn!(connector = %connector, "No connector auth file configured, skipping");
            return Ok(StepOutcome::skipped("connector auth file not configured"));
        };

        let auth = ConnectorAuth::load(&auth_path)?;
        let Some(credentials) = auth.get(&connector) else {
            warn!(connector = %connector, "No credentials for connector, skipping");
            return Ok(StepOutcome::skipped(format!("no credentials for {}", connector)));
        };

        let merchant_id = state.require_str(keys::MERCHANT_ID)?;
        let mut credentials_layer = Map::new();
        credentials_layer.insert(
            "connector_account_details".to_string(),
            Value::Object(credentials.connector_account_details.clone()),
        );
        if let Some(metadata) = &credentials.metadata {
            credentials_layer.insert("metadata".to_string(), Value::Object(metadata.clone()));
        }
        let call_site = overrides([("profile_id", state.get(keys::PROFILE_ID).cloned())]);
        let body = build_request_body(
            &request_bodies::connector_create(&connector),
            &credentials_layer,
            &[call_site],
        );
        let expected = expect_ok_with([("connector_name", json!(connector))]);

        let response = self
            .post_checked(
                &format!("/account/{}/connectors", merchant_id),
                &self.admin(state),
                body,
                &expected,
            )
            .await?;

        record_str(state, keys::MERCHANT_CONNECTOR_ID, &response, "merchant_connector_id");
        info!(connector = %connector, "Connector created");
        Ok(StepOutcome::proceed())
    }

    pub async fn customer_delete(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let customer_id = state.require_str(keys::CUSTOMER_ID)?;
        let expected = expect_ok_with([
            ("customer_id", json!(customer_id)),
            ("customer_deleted", json!(true)),
        ]);

        self.delete_checked(
            &format!("/customers/{}", customer_id),
            &self.secret(state)?,
            &expected,
        )
        .await?;

        state.delete(keys::CUSTOMER_ID);
        Ok(StepOutcome::proceed())
    }
}
