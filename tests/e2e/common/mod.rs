// Live suite setup
//
// Suites here talk to a real payments service and are `#[ignore]`d by default:
//   E2E_BASE_URL=http://localhost:8080 E2E_CONNECTOR_ID=stripe \
//   E2E_CONNECTOR_AUTH_FILE_PATH=creds.json cargo test --test card_no3ds_suite -- --ignored

#![allow(dead_code)]

use connector_e2e::client::ReqwestPaymentsClient;
use connector_e2e::config::E2eConfig;
use connector_e2e::core::{init_tracing, Result};
use connector_e2e::flows::{Harness, SerialSuite};
use connector_e2e::state::SharedState;

pub type LiveHarness = Harness<ReqwestPaymentsClient>;

/// Harness and suite configured from the environment (and `.env`)
pub fn live_suite(name: &str) -> anyhow::Result<(LiveHarness, SerialSuite)> {
    init_tracing();

    let config = E2eConfig::from_env()?;
    config.validate()?;

    let client = ReqwestPaymentsClient::new(config.service.clone())?;
    let suite = SerialSuite::new(name, &config);
    Ok((Harness::new(client, config), suite))
}

/// Fresh snapshot, then merchant, API key, customer and connector
pub async fn account_setup(suite: &mut SerialSuite, harness: &LiveHarness) -> Result<()> {
    suite.reset_state()?;

    suite
        .step("merchant_create", async |s: &mut SharedState| harness.merchant_create(s).await)
        .await?;
    suite
        .step("api_key_create", async |s: &mut SharedState| harness.api_key_create(s).await)
        .await?;
    suite
        .step("customer_create", async |s: &mut SharedState| harness.customer_create(s).await)
        .await?;
    suite
        .step("connector_create", async |s: &mut SharedState| harness.connector_create(s).await)
        .await?;

    Ok(())
}
