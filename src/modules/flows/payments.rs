use serde_json::{json, Value};
use tracing::info;

use super::harness::{path_with_query, record_created_payment, record_payment, Harness};
use super::models::{AuthenticationType, CaptureMethod, StepOutcome};
use crate::core::{E2eError, Result};
use crate::modules::client::PaymentsClient;
use crate::modules::fixtures::{
    build_request_body, category, overrides, request_bodies, ExpectedResponse, ScenarioFixture,
};
use crate::modules::redirection::{redirect_status, BrowserDriver, RedirectionHandler};
use crate::modules::state::{keys, SharedState};

/// Return-URL statuses that mean the challenge did not authorise the payment
const FAILED_REDIRECT_STATUSES: [&str; 2] = ["failed", "cancelled"];

impl<C: PaymentsClient> Harness<C> {
    /// Create an unconfirmed payment from the category's `PaymentIntent`
    ///
    /// Categories whose intent depends on the sub-method (bank transfers) keep
    /// one `PaymentIntent` per sub-method, e.g. `bank_transfer_pm.PaymentIntent.Pix`.
    pub async fn create_payment_intent(
        &self,
        state: &mut SharedState,
        category: &str,
        sub_method: Option<&str>,
        authentication_type: AuthenticationType,
        capture_method: CaptureMethod,
    ) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario_variant(&connector, category, "PaymentIntent", sub_method) else {
            let name = match sub_method {
                Some(sub_method) => format!("PaymentIntent.{}", sub_method),
                None => "PaymentIntent".to_string(),
            };
            return Ok(self.not_configured(&connector, category, &name));
        };

        let call_site = overrides([
            ("authentication_type", Some(json!(authentication_type))),
            ("capture_method", Some(json!(capture_method))),
            ("customer_id", state.get(keys::CUSTOMER_ID).cloned()),
            ("profile_id", state.get(keys::PROFILE_ID).cloned()),
        ]);
        let body = build_request_body(&request_bodies::payment_intent(), &fixture.request, &[call_site]);

        let response = self
            .post_checked("/payments", &self.secret(state)?, body, &fixture.response)
            .await?;

        record_created_payment(state, &response);

        Ok(StepOutcome::from_expected(&fixture.response))
    }

    /// List payment methods available to the recorded client secret
    pub async fn payment_methods_list(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let client_secret = state.require_str(keys::CLIENT_SECRET)?;
        let response = self
            .get_checked(
                &path_with_query("/account/payment_methods", &[("client_secret", client_secret.as_str())])?,
                &self.publishable(state)?,
                &ExpectedResponse::ok(),
            )
            .await?;

        let methods = response
            .body
            .get("payment_methods")
            .and_then(Value::as_array)
            .ok_or_else(|| E2eError::mismatch("payment methods list has no 'payment_methods' array"))?;
        info!(count = methods.len(), "Listed payment methods");

        Ok(StepOutcome::proceed())
    }

    /// Confirm the recorded intent with a flat scenario, e.g. `card_pm.No3DSAutoCapture`
    pub async fn confirm_payment(
        &self,
        state: &mut SharedState,
        category: &str,
        scenario: &str,
    ) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        match self.scenario(&connector, category, scenario) {
            Some(fixture) => self.confirm_with(state, fixture).await,
            None => Ok(self.not_configured(&connector, category, scenario)),
        }
    }

    /// Confirm with a bank transfer sub-method (`Pix`, `Ach`, ...)
    pub async fn confirm_bank_transfer(&self, state: &mut SharedState, sub_method: &str) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        match self.scenario_variant(&connector, category::BANK_TRANSFER, "BankTransfer", Some(sub_method)) {
            Some(fixture) => self.confirm_with(state, fixture).await,
            None => Ok(self.not_configured(&connector, category::BANK_TRANSFER, sub_method)),
        }
    }

    async fn confirm_with(&self, state: &mut SharedState, fixture: &ScenarioFixture) -> Result<StepOutcome> {
        let payment_id = state.require_str(keys::PAYMENT_ID)?;
        let client_secret = state.require_str(keys::CLIENT_SECRET)?;
        let call_site = overrides([
            ("client_secret", Some(json!(client_secret))),
            ("customer_id", state.get(keys::CUSTOMER_ID).cloned()),
        ]);
        let body = build_request_body(
            &request_bodies::payment_confirm(self.return_url()),
            &fixture.request,
            &[call_site],
        );

        let response = self
            .post_checked(
                &format!("/payments/{}/confirm", payment_id),
                &self.publishable(state)?,
                body,
                &fixture.response,
            )
            .await?;

        record_payment(state, &response);
        Ok(StepOutcome::from_expected(&fixture.response))
    }

    /// Create and confirm in one call
    pub async fn create_confirm_payment(
        &self,
        state: &mut SharedState,
        scenario: &str,
        authentication_type: AuthenticationType,
        capture_method: CaptureMethod,
    ) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario(&connector, category::CARD, scenario) else {
            return Ok(self.not_configured(&connector, category::CARD, scenario));
        };

        let call_site = overrides([
            ("authentication_type", Some(json!(authentication_type))),
            ("capture_method", Some(json!(capture_method))),
            ("customer_id", state.get(keys::CUSTOMER_ID).cloned()),
            ("profile_id", state.get(keys::PROFILE_ID).cloned()),
        ]);
        let body = build_request_body(
            &request_bodies::create_confirm_payment(self.return_url()),
            &fixture.request,
            &[call_site],
        );

        let response = self
            .post_checked("/payments", &self.secret(state)?, body, &fixture.response)
            .await?;

        record_created_payment(state, &response);

        Ok(StepOutcome::from_expected(&fixture.response))
    }

    /// Capture the recorded payment (`Capture` or `PartialCapture`)
    pub async fn capture_payment(&self, state: &mut SharedState, scenario: &str) -> Result<StepOutcome> {
        self.payment_action(state, scenario, "capture", request_bodies::capture())
            .await
    }

    pub async fn void_payment(&self, state: &mut SharedState) -> Result<StepOutcome> {
        self.payment_action(state, "Void", "cancel", request_bodies::void())
            .await
    }

    async fn payment_action(
        &self,
        state: &mut SharedState,
        scenario: &str,
        action: &str,
        base: Value,
    ) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario(&connector, category::CARD, scenario) else {
            return Ok(self.not_configured(&connector, category::CARD, scenario));
        };

        let payment_id = state.require_str(keys::PAYMENT_ID)?;
        let body = build_request_body(&base, &fixture.request, &[]);

        let response = self
            .post_checked(
                &format!("/payments/{}/{}", payment_id, action),
                &self.secret(state)?,
                body,
                &fixture.response,
            )
            .await?;

        record_payment(state, &response);
        Ok(StepOutcome::from_expected(&fixture.response))
    }

    /// Force-sync the recorded payment against `card_pm.SyncPayment`
    pub async fn retrieve_payment(&self, state: &mut SharedState) -> Result<StepOutcome> {
        let connector = self.connector_id(state);
        let Some(fixture) = self.scenario(&connector, category::CARD, "SyncPayment") else {
            return Ok(self.not_configured(&connector, category::CARD, "SyncPayment"));
        };

        let payment_id = state.require_str(keys::PAYMENT_ID)?;
        let mut expected = fixture.response.clone();
        expected
            .body
            .insert("payment_id".to_string(), json!(payment_id));

        let response = self
            .get_checked(
                &format!("/payments/{}?force_sync=true", payment_id),
                &self.secret(state)?,
                &expected,
            )
            .await?;

        record_payment(state, &response);
        Ok(StepOutcome::from_expected(&fixture.response))
    }

    /// Complete the pending `next_action` redirect in a browser
    ///
    /// Skips when the last payment response carried no redirect.
    pub async fn follow_redirection<D: BrowserDriver>(
        &self,
        state: &mut SharedState,
        handler: &RedirectionHandler<D>,
    ) -> Result<StepOutcome> {
        let Some(next_action_url) = state.get_str(keys::NEXT_ACTION_URL).map(str::to_owned) else {
            return Ok(StepOutcome::skipped("no redirect pending"));
        };
        let connector = self.connector_id(state);

        let landed = handler
            .handle_redirection(&connector, &next_action_url, self.return_url())
            .await?;

        state.delete(keys::NEXT_ACTION_URL);
        if let Some(status) = redirect_status(&landed) {
            if FAILED_REDIRECT_STATUSES.contains(&status.as_str()) {
                return Err(E2eError::mismatch(format!(
                    "redirection returned with status '{}': {}",
                    status, landed
                )));
            }
            state.set(keys::PAYMENT_STATUS, status);
        }

        Ok(StepOutcome::proceed())
    }
}
