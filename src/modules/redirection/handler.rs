use std::future::Future;
use std::time::Duration;

use tracing::{debug, info};

use super::browser::BrowserDriver;
use super::challenge::{challenge_steps, ChallengeStep};
use crate::config::RedirectConfig;
use crate::core::{E2eError, Result};

/// Follows a payment's `next_action` redirect through the connector challenge
pub struct RedirectionHandler<D> {
    driver: D,
    config: RedirectConfig,
}

impl<D: BrowserDriver> RedirectionHandler<D> {
    pub fn new(driver: D, config: RedirectConfig) -> Self {
        Self { driver, config }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Open `next_action_url`, complete the connector's challenge and wait for
    /// the browser to land on `expected_return_url_pattern`
    ///
    /// Returns the final URL. Each wait is bounded by the matching
    /// [`RedirectConfig`] timeout.
    pub async fn handle_redirection(
        &self,
        connector_id: &str,
        next_action_url: &str,
        expected_return_url_pattern: &str,
    ) -> Result<String> {
        info!(connector = %connector_id, url = %next_action_url, "Following redirection");

        let page_load = self.config.page_load_timeout;
        bounded(
            page_load,
            next_action_url,
            self.driver.navigate(next_action_url, page_load),
        )
        .await?;

        let element = self.config.element_timeout;
        for step in challenge_steps(connector_id) {
            debug!(connector = %connector_id, ?step, "Challenge step");
            match *step {
                ChallengeStep::Click { frames, selector } => {
                    bounded(element, selector, self.driver.click_in_frame(frames, selector, element)).await?
                }
                ChallengeStep::Fill {
                    frames,
                    selector,
                    value,
                } => {
                    bounded(
                        element,
                        selector,
                        self.driver.fill_in_frame(frames, selector, value, element),
                    )
                    .await?
                }
            }
        }

        let redirect = self.config.redirect_timeout;
        let landed = bounded(
            redirect,
            expected_return_url_pattern,
            self.driver.wait_for_url(expected_return_url_pattern, redirect),
        )
        .await?;

        info!(connector = %connector_id, url = %landed, "Redirection completed");
        Ok(landed)
    }
}

async fn bounded<T, F>(limit: Duration, target: &str, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| E2eError::RedirectTimeout {
            pattern: target.to_string(),
            waited: limit,
        })?
}
