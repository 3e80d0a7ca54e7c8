use serde_json::json;

use super::harness::{record_str, Harness};
use super::models::StepOutcome;
use crate::core::Result;
use crate::modules::client::PaymentsClient;
use crate::modules::fixtures::{build_request_body, category, overrides, request_bodies};
use crate::modules::state::{keys, SharedState};

impl<C: PaymentsClient> Harness<C> {
    /// Refund the recorded payment (`Refund` or `PartialRefund`)
    pub async fn refund_payment(&self, state: &mut SharedState, scenario: &str) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario(&connector, category::CARD, scenario) else {
            return Ok(self.not_configured(&connector, category::CARD, scenario));
        };

        let payment_id = state.require_str(keys::PAYMENT_ID)?;
        let call_site = overrides([("payment_id", Some(json!(payment_id)))]);
        let body = build_request_body(&request_bodies::refund(), &fixture.request, &[call_site]);

        let response = self
            .post_checked("/refunds", &self.secret(state)?, body, &fixture.response)
            .await?;

        record_str(state, keys::REFUND_ID, &response, "refund_id");
        Ok(StepOutcome::from_expected(&fixture.response))
    }

    pub async fn sync_refund(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario(&connector, category::CARD, "SyncRefund") else {
            return Ok(self.not_configured(&connector, category::CARD, "SyncRefund"));
        };

        let refund_id = state.require_str(keys::REFUND_ID)?;
        self.get_checked(
            &format!("/refunds/{}", refund_id),
            &self.secret(state)?,
            &fixture.response,
        )
        .await?;

        Ok(StepOutcome::from_expected(&fixture.response))
    }
}
