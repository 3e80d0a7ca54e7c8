use serde_json::{json, Value};
use tracing::info;

use super::harness::{record_created_payment, record_str, Harness};
use super::models::StepOutcome;
use crate::core::{E2eError, Result};
use crate::modules::client::PaymentsClient;
use crate::modules::fixtures::{
    build_request_body, category, overrides, request_bodies, ExpectedResponse,
};
use crate::modules::state::{keys, SharedState};

impl<C: PaymentsClient> Harness<C> {
    /// Customer-initiated payment that sets up a mandate for later MITs
    pub async fn cit_for_mandate(&self, state: &mut SharedState, scenario: &str) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario(&connector, category::CARD, scenario) else {
            return Ok(self.not_configured(&connector, category::CARD, scenario));
        };

        let customer_id = state.require_str(keys::CUSTOMER_ID)?;
        let call_site = overrides([
            ("customer_id", Some(json!(customer_id))),
            ("profile_id", state.get(keys::PROFILE_ID).cloned()),
        ]);
        let body = build_request_body(
            &request_bodies::cit_mandate(self.return_url()),
            &fixture.request,
            &[call_site],
        );

        let response = self
            .post_checked("/payments", &self.secret(state)?, body, &fixture.response)
            .await?;

        record_created_payment(state, &response);
        record_str(state, keys::MANDATE_ID, &response, "mandate_id");
        record_str(state, keys::PAYMENT_METHOD_ID, &response, "payment_method_id");

        Ok(StepOutcome::from_expected(&fixture.response))
    }

    /// Merchant-initiated payment against the recorded mandate
    pub async fn mit_for_mandate(&self, state: &mut SharedState, scenario: &str) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario(&connector, category::CARD, scenario) else {
            return Ok(self.not_configured(&connector, category::CARD, scenario));
        };

        let mandate_id = state.require_str(keys::MANDATE_ID)?;
        let call_site = overrides([
            ("mandate_id", Some(json!(mandate_id))),
            ("customer_id", state.get(keys::CUSTOMER_ID).cloned()),
            ("profile_id", state.get(keys::PROFILE_ID).cloned()),
        ]);
        let body = build_request_body(
            &request_bodies::mit_mandate(self.return_url()),
            &fixture.request,
            &[call_site],
        );

        let response = self
            .post_checked("/payments", &self.secret(state)?, body, &fixture.response)
            .await?;

        record_created_payment(state, &response);
        Ok(StepOutcome::from_expected(&fixture.response))
    }

    /// Saved payment methods of the recorded customer; records the first one
    pub async fn list_customer_payment_methods(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let customer_id = state.require_str(keys::CUSTOMER_ID)?;
        let response = self
            .get_checked(
                &format!("/customers/{}/payment_methods", customer_id),
                &self.secret(state)?,
                &ExpectedResponse::ok(),
            )
            .await?;

        let first = response
            .body
            .get("customer_payment_methods")
            .and_then(Value::as_array)
            .and_then(|methods| methods.first())
            .ok_or_else(|| {
                E2eError::mismatch(format!("customer {} has no saved payment methods", customer_id))
            })?;

        if let Some(token) = first.get("payment_token").and_then(Value::as_str) {
            state.set(keys::PAYMENT_TOKEN, token);
        }
        if let Some(id) = first.get("payment_method_id").and_then(Value::as_str) {
            state.set(keys::PAYMENT_METHOD_ID, id);
        }

        info!(customer_id = %customer_id, "Recorded saved payment method");
        Ok(StepOutcome::proceed())
    }
}
